use crate::config::Config;
use crate::core::error::{DownloadError, Result};
use crate::core::quality::{available_qualities, negotiate_quality};
use crate::core::subtitles::download_subtitles;
use crate::core::{Downloader, MetadataSource, QualityResolver, VideoMetadata};
use crate::extractors::extract_video_id;
use crate::utils::generate_output_filename;
use std::path::PathBuf;
use tracing::{info, warn};

/// One download request: a page URL plus what to fetch from it.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub url: String,
    pub subtitles: bool,
    pub verbose: bool,
}

/// Outcome of the quality negotiation: metadata fetched at `quality`.
#[derive(Debug, Clone)]
pub struct ResolvedVideo {
    pub video_id: u64,
    pub quality: String,
    pub metadata: VideoMetadata,
}

#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub video_id: u64,
    pub quality: String,
    pub media_path: PathBuf,
    pub media_bytes: u64,
    pub subtitle_path: Option<PathBuf>,
}

impl DownloadJob {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            subtitles: false,
            verbose: false,
        }
    }

    pub fn with_subtitles(mut self, subtitles: bool) -> Self {
        self.subtitles = subtitles;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Extracts the id, fetches the catalog, agrees on a quality and fetches
    /// the metadata again at that quality.
    ///
    /// The catalog response is only used for its quality list: its media URL
    /// is bound to the catalog quality and is dropped here.
    pub async fn resolve(
        &self,
        config: &Config,
        source: &dyn MetadataSource,
        resolver: &mut dyn QualityResolver,
    ) -> Result<ResolvedVideo> {
        let video_id = extract_video_id(&self.url)
            .ok_or_else(|| DownloadError::NoVideoId(self.url.clone()))?;
        info!("Video ID: {} ({})", video_id, source.name());

        self.print_request(source, video_id, &config.catalog_quality);
        let catalog = source
            .fetch_video_meta(video_id, &config.catalog_quality)
            .await?;
        let stream = catalog.stream()?;

        if self.verbose {
            for quality in &stream.available_qualities {
                println!("{}", quality);
            }
        }

        let available = available_qualities(stream);
        let quality = negotiate_quality(&available, resolver)?;
        info!("Selected quality: {}", quality);

        self.print_request(source, video_id, &quality);
        let metadata = source.fetch_video_meta(video_id, &quality).await?;
        if self.verbose {
            println!("Stream URL: {}", metadata.stream()?.url);
        }

        Ok(ResolvedVideo {
            video_id,
            quality,
            metadata,
        })
    }

    fn print_request(&self, source: &dyn MetadataSource, video_id: u64, quality: &str) {
        if self.verbose {
            if let Some(url) = source.request_url(video_id, quality) {
                println!("API URL: {}", url);
            }
        }
    }

    /// Runs the whole pipeline: subtitles first when requested, then media.
    pub async fn run(
        &self,
        config: &Config,
        client: &reqwest::Client,
        source: &dyn MetadataSource,
        resolver: &mut dyn QualityResolver,
    ) -> Result<DownloadReport> {
        let resolved = self.resolve(config, source, resolver).await?;
        let stream = resolved.metadata.stream()?;
        let title = &resolved.metadata.show_title;

        let subtitle_path = if self.subtitles && stream.has_subtitles() {
            let path = config
                .output_dir
                .join(generate_output_filename(title, resolved.video_id, "srt"));
            download_subtitles(client, stream, config, &path).await?;
            Some(path)
        } else {
            if self.subtitles {
                warn!("No subtitles available for {}", title);
            }
            None
        };

        let media_path = config
            .output_dir
            .join(generate_output_filename(title, resolved.video_id, "mp4"));
        let downloader = Downloader::new(client.clone(), config, self.verbose);
        let media_bytes = downloader.download_media(&stream.url, &media_path).await?;

        Ok(DownloadReport {
            video_id: resolved.video_id,
            quality: resolved.quality,
            media_path,
            media_bytes,
            subtitle_path,
        })
    }
}
