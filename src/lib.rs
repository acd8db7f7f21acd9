pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod utils;

pub use config::Config;
pub use core::{
    DownloadError, DownloadJob, Downloader, MetadataSource, QualityResolver, Stream,
    VideoMetadata,
};
pub use extractors::{extract_video_id, IvysilaniExtractor};
