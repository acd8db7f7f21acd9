use crate::config::Config;
use crate::core::error::Result;
use crate::core::metadata::{CaptionItem, Stream};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Renders cues as SRT blocks, in the order received.
pub fn render_srt(items: &[CaptionItem]) -> String {
    let mut out = String::new();
    for item in items {
        // writing into a String cannot fail
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            item.id, item.from_time, item.to_time, item.text
        );
    }
    out
}

/// Fetches the JSON cue list of `stream` and writes it to `output_path` as
/// SRT. Returns the number of cues written.
pub async fn download_subtitles(
    client: &reqwest::Client,
    stream: &Stream,
    config: &Config,
    output_path: &Path,
) -> Result<usize> {
    let file = stream.subtitle_file(&config.subtitle_format)?;
    debug!("Subtitle URL: {}", file.url);

    let body = client
        .get(&file.url)
        .timeout(config.timeout())
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let items: Vec<CaptionItem> = serde_json::from_slice(&body)?;

    tokio::fs::write(output_path, render_srt(&items)).await?;
    info!("Wrote {} subtitle cues to {}", items.len(), output_path.display());

    Ok(items.len())
}
