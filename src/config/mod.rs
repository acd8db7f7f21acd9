use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Metadata endpoint of the iVysilani playlist API. `{video_id}` is replaced
/// with the numeric identifier taken from the page URL.
pub const API_URL_TEMPLATE: &str =
    "https://api.ceskatelevize.cz/video/v1/playlist-vod/v1/stream-data/media/external/{video_id}";

/// Quality requested by the first (catalog) fetch. The URL it returns is
/// never downloaded.
pub const CATALOG_QUALITY: &str = "web";

/// Always offered in addition to the advertised renditions.
pub const AUDIO_QUALITY: &str = "audio";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url_template: String,
    pub can_play_drm: bool,
    pub stream_type: String,
    pub catalog_quality: String,
    /// Limit in seconds on each network operation: connecting, waiting for
    /// response headers and every read of a response body.
    pub timeout: u64,
    /// Size of the blocks written to disk during a media transfer.
    pub chunk_size: usize,
    pub user_agent: String,
    pub media_content_types: Vec<String>,
    pub subtitle_format: String,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url_template: API_URL_TEMPLATE.to_string(),
            can_play_drm: false,
            stream_type: "progressive".to_string(),
            catalog_quality: CATALOG_QUALITY.to_string(),
            timeout: 10,
            chunk_size: 1024 * 1024,
            user_agent: format!("ivysilani-dl/{}", env!("CARGO_PKG_VERSION")),
            media_content_types: vec!["video/mp4".to_string(), "audio/mp4".to_string()],
            subtitle_format: "json".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Reads a TOML config file when `path` is given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("Could not read config file {}: {}", path.display(), e)
                })?;
                Self::from_toml(&raw)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(raw)?;
        if config.chunk_size == 0 {
            anyhow::bail!("chunk_size must be greater than zero");
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn api_url(&self, video_id: u64) -> String {
        self.api_url_template.replace("{video_id}", &video_id.to_string())
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_api_url_template(mut self, template: impl Into<String>) -> Self {
        self.api_url_template = template.into();
        self
    }
}
