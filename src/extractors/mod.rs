pub mod ivysilani;

pub use ivysilani::{extract_video_id, IvysilaniExtractor};
