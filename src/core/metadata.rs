use crate::core::error::{DownloadError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response body of the stream-data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub show_title: String,
    pub streams: Vec<Stream>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Time-limited media URL, only valid for the quality it was issued with.
    pub url: String,
    #[serde(default)]
    pub available_qualities: Vec<AvailableQuality>,
    #[serde(default)]
    pub subtitles: Option<Vec<SubtitleTrack>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableQuality {
    pub quality: String,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleTrack {
    #[serde(default)]
    pub files: Vec<SubtitleFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleFile {
    pub format: String,
    pub url: String,
}

/// One cue of the JSON subtitle file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptionItem {
    pub id: CueValue,
    pub from_time: CueValue,
    pub to_time: CueValue,
    pub text: String,
}

/// Cue ids and timestamps are copied verbatim, whether the API sends them
/// as numbers or strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CueValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for CueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueValue::Number(n) => write!(f, "{}", n),
            CueValue::Text(s) => f.write_str(s),
        }
    }
}

impl VideoMetadata {
    /// The response must carry exactly one stream.
    pub fn stream(&self) -> Result<&Stream> {
        match self.streams.as_slice() {
            [stream] => Ok(stream),
            streams => Err(DownloadError::StreamCount(streams.len())),
        }
    }
}

impl Stream {
    pub fn quality_labels(&self) -> Vec<String> {
        self.available_qualities
            .iter()
            .map(|q| q.quality.clone())
            .collect()
    }

    pub fn has_subtitles(&self) -> bool {
        self.subtitles.as_ref().is_some_and(|tracks| !tracks.is_empty())
    }

    /// Finds the single subtitle file of `format` in the single subtitle track.
    pub fn subtitle_file(&self, format: &str) -> Result<&SubtitleFile> {
        let tracks = self.subtitles.as_deref().unwrap_or_default();
        let track = match tracks {
            [track] => track,
            tracks => return Err(DownloadError::SubtitleTrackCount(tracks.len())),
        };

        let mut matching = track.files.iter().filter(|f| f.format == format);
        match (matching.next(), matching.next()) {
            (Some(file), None) => Ok(file),
            (first, _) => Err(DownloadError::SubtitleFileCount {
                format: format.to_string(),
                count: first.map_or(0, |_| 2 + matching.count()),
            }),
        }
    }
}

impl fmt::Display for AvailableQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quality: {}, Codec: {}, FPS: {}, Weight: {}",
            self.quality,
            self.codec.as_deref().unwrap_or("unknown"),
            self.fps.map_or("unknown".to_string(), |fps| fps.to_string()),
            self.weight.map_or("unknown".to_string(), |w| w.to_string()),
        )
    }
}
