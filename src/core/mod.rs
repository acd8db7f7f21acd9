pub mod downloader;
pub mod error;
pub mod extractor;
pub mod job;
pub mod metadata;
pub mod quality;
pub mod subtitles;

pub use downloader::Downloader;
pub use error::{DownloadError, Result};
pub use extractor::MetadataSource;
pub use job::{DownloadJob, DownloadReport, ResolvedVideo};
pub use metadata::{AvailableQuality, CaptionItem, Stream, SubtitleTrack, VideoMetadata};
pub use quality::{negotiate_quality, Preselected, Prompt, QualityResolver};
