use crate::config::Config;
use crate::core::error::{DownloadError, Result};
use crate::utils::format_progress;
use futures::StreamExt;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;
use tracing::{debug, info};

pub struct Downloader {
    client: reqwest::Client,
    chunk_size: usize,
    timeout: Duration,
    media_content_types: Vec<String>,
    pub verbose: bool,
}

impl Downloader {
    pub fn new(client: reqwest::Client, config: &Config, verbose: bool) -> Self {
        Self {
            client,
            chunk_size: config.chunk_size.max(1),
            timeout: config.timeout(),
            media_content_types: config.media_content_types.clone(),
            verbose,
        }
    }

    /// HTTP client shared by every request of a run. Only connecting is
    /// bounded here, callers bound each request or body read themselves.
    pub fn build_client(config: &Config) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(client)
    }

    /// Streams the media at `url` into `output_path`, returning the number
    /// of bytes written. The URL must come from a metadata fetch made with
    /// the quality being downloaded.
    pub async fn download_media(&self, url: &str, output_path: &Path) -> Result<u64> {
        debug!("GET {}", url);
        let response = timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| DownloadError::Timeout(self.timeout))??
            .error_for_status()?;

        let total = check_media_headers(response.headers(), &self.media_content_types)?;
        if self.verbose {
            println!("Downloading to: {} ({} bytes)", output_path.display(), total);
        }

        self.perform_download(response, output_path, total).await
    }

    async fn perform_download(
        &self,
        response: reqwest::Response,
        output_path: &Path,
        total: u64,
    ) -> Result<u64> {
        let mut file = File::create(output_path).await?;
        let mut stream = response.bytes_stream();
        let mut block = Vec::with_capacity(self.chunk_size);
        let mut downloaded: u64 = 0;

        // bounded per read, not per transfer
        while let Some(chunk) = timeout(self.timeout, stream.next())
            .await
            .map_err(|_| DownloadError::Timeout(self.timeout))?
        {
            let bytes = chunk?;
            let mut rest = &bytes[..];
            while !rest.is_empty() {
                let take = rest.len().min(self.chunk_size - block.len());
                block.extend_from_slice(&rest[..take]);
                rest = &rest[take..];

                if block.len() == self.chunk_size {
                    downloaded += write_block(&mut file, &mut block).await?;
                    self.report(downloaded, total)?;
                }
            }
        }
        if !block.is_empty() {
            downloaded += write_block(&mut file, &mut block).await?;
            self.report(downloaded, total)?;
        }

        if self.verbose {
            println!(); // New line after progress
        }
        file.flush().await?;

        if downloaded != total {
            return Err(DownloadError::Incomplete {
                expected: total,
                received: downloaded,
            });
        }

        info!("Downloaded to: {}", output_path.display());
        Ok(downloaded)
    }

    fn report(&self, downloaded: u64, total: u64) -> Result<()> {
        if self.verbose {
            print!("\r{}", format_progress(downloaded, total));
            std::io::stdout().flush()?;
        }
        Ok(())
    }
}

async fn write_block(file: &mut File, block: &mut Vec<u8>) -> Result<u64> {
    file.write_all(block).await?;
    let written = block.len() as u64;
    block.clear();
    Ok(written)
}

/// Validates the media response headers and returns the declared length.
pub fn check_media_headers(headers: &HeaderMap, accepted: &[String]) -> Result<u64> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let mime = content_type
        .as_deref()
        .map(|v| v.split(';').next().unwrap_or_default().trim());
    if !mime.is_some_and(|m| accepted.iter().any(|a| a.eq_ignore_ascii_case(m))) {
        return Err(DownloadError::UnexpectedContentType(content_type));
    }

    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .ok_or(DownloadError::MissingContentLength)
}
