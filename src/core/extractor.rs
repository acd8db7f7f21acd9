use crate::core::error::Result;
use crate::core::VideoMetadata;
use async_trait::async_trait;

/// Source of stream metadata for a video.
///
/// Every call must hit the API afresh: the media URL in the response is bound
/// to the `quality` it was requested with, so results are never cached or
/// reused across qualities.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// The URL `fetch_video_meta` would request, for verbose output.
    fn request_url(&self, _video_id: u64, _quality: &str) -> Option<String> {
        None
    }

    /// Fetches the stream data for `video_id` at `quality`. Implementations
    /// reject responses that do not carry exactly one stream.
    async fn fetch_video_meta(&self, video_id: u64, quality: &str) -> Result<VideoMetadata>;
}
