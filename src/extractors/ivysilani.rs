use crate::config::Config;
use crate::core::error::Result;
use crate::core::{MetadataSource, VideoMetadata};
use async_trait::async_trait;
use url::Url;

/// Client for the iVysilani stream-data API.
pub struct IvysilaniExtractor {
    client: reqwest::Client,
    config: Config,
}

impl IvysilaniExtractor {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Builds the stream-data URL for `video_id` at `quality`.
    pub fn api_url(&self, video_id: u64, quality: &str) -> Result<Url> {
        let drm = if self.config.can_play_drm { "true" } else { "false" };
        let url = Url::parse_with_params(
            &self.config.api_url(video_id),
            &[
                ("canPlayDrm", drm),
                ("quality", quality),
                ("streamType", self.config.stream_type.as_str()),
            ],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl MetadataSource for IvysilaniExtractor {
    fn name(&self) -> &'static str {
        "iVysilani"
    }

    fn request_url(&self, video_id: u64, quality: &str) -> Option<String> {
        self.api_url(video_id, quality).ok().map(String::from)
    }

    async fn fetch_video_meta(&self, video_id: u64, quality: &str) -> Result<VideoMetadata> {
        let api_url = self.api_url(video_id, quality)?;
        tracing::debug!("API URL: {}", api_url);

        let response = self
            .client
            .get(api_url)
            .header("Accept", "application/json")
            .timeout(self.config.timeout())
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let metadata: VideoMetadata = serde_json::from_slice(&body)?;

        // fail fast before anyone can pick a stream out of a bad response
        metadata.stream()?;
        tracing::debug!(
            "Fetched metadata for {} at quality {}: {}",
            video_id,
            quality,
            metadata.show_title
        );

        Ok(metadata)
    }
}

/// Finds the numeric video id in a page URL.
///
/// The first path segment made only of decimal digits that fits a `u64`
/// wins. Without one, the leading digits of the first `<digits>-<slug>`
/// segment are used, which is how show pages such as
/// `/ivysilani/12345-show-name` are addressed.
pub fn extract_video_id(page_url: &str) -> Option<u64> {
    let segments: Vec<String> = match Url::parse(page_url) {
        Ok(url) => url
            .path_segments()
            .map(|segments| segments.map(str::to_string).collect())
            .unwrap_or_default(),
        Err(_) => page_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .map(str::to_string)
            .collect(),
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    segments
        .iter()
        .filter(|s| is_digits(s.as_str()))
        .find_map(|s| s.parse().ok())
        .or_else(|| {
            segments.iter().find_map(|s| {
                let (prefix, rest) = s.split_once('-')?;
                if is_digits(prefix) && !rest.is_empty() {
                    prefix.parse().ok()
                } else {
                    None
                }
            })
        })
}
