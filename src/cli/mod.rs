use crate::config::Config;
use crate::core::{DownloadJob, Downloader, Preselected, Prompt, QualityResolver};
use crate::extractors::IvysilaniExtractor;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ivysilani-dl")]
#[command(about = "Download progressive video streams from iVysilani")]
#[command(version)]
pub struct Cli {
    /// URL of the video page
    #[arg(value_name = "URL")]
    pub url: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quality to download; prompts when omitted
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Also download subtitles as SRT
    #[arg(long)]
    pub subtitles: bool,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn config(&self) -> Result<Config> {
        let config = Config::load(self.config.as_deref())?;
        Ok(match &self.output {
            Some(output) => config.with_output_dir(output),
            None => config,
        })
    }

    /// Default log filter; `-v` only raises this crate to DEBUG, dependencies
    /// stay at WARN.
    pub fn log_directives(&self) -> &'static str {
        if self.verbose {
            "warn,ivysilani_dl=debug"
        } else {
            "warn,ivysilani_dl=info"
        }
    }

    pub fn resolver(&self) -> Box<dyn QualityResolver> {
        match &self.quality {
            Some(quality) => Box::new(Preselected(quality.clone())),
            None => Box::new(Prompt::stdin()),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;
        let client = Downloader::build_client(&config)?;
        let extractor = IvysilaniExtractor::new(client.clone(), &config);

        let job = DownloadJob::new(&self.url)
            .with_subtitles(self.subtitles)
            .with_verbose(self.verbose);

        let mut resolver = self.resolver();
        let report = job
            .run(&config, &client, &extractor, resolver.as_mut())
            .await?;

        if let Some(subtitle_path) = &report.subtitle_path {
            println!("Subtitles: {}", subtitle_path.display());
        }
        println!(
            "Downloaded {} ({} bytes, {})",
            report.media_path.display(),
            report.media_bytes,
            report.quality
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "ivysilani-dl",
            "-v",
            "-q",
            "720p",
            "--subtitles",
            "https://www.example.tv/ivysilani/12345-show-name",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(cli.subtitles);
        assert_eq!(cli.quality.as_deref(), Some("720p"));
        assert_eq!(cli.url, "https://www.example.tv/ivysilani/12345-show-name");
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ivysilani-dl", "https://www.example.tv/1"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.subtitles);
        assert!(cli.quality.is_none());
        assert_eq!(cli.config().unwrap().output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_verbose_only_raises_own_logs() {
        let quiet = Cli::try_parse_from(["ivysilani-dl", "https://www.example.tv/1"]).unwrap();
        assert_eq!(quiet.log_directives(), "warn,ivysilani_dl=info");

        let verbose =
            Cli::try_parse_from(["ivysilani-dl", "-v", "https://www.example.tv/1"]).unwrap();
        assert_eq!(verbose.log_directives(), "warn,ivysilani_dl=debug");
        assert!(tracing_subscriber::EnvFilter::try_new(verbose.log_directives()).is_ok());
    }

    #[test]
    fn test_url_required() {
        assert!(Cli::try_parse_from(["ivysilani-dl", "-v"]).is_err());
    }

    #[test]
    fn test_output_overrides_config() {
        let cli = Cli::try_parse_from(["ivysilani-dl", "-o", "videos", "https://www.example.tv/1"])
            .unwrap();
        assert_eq!(cli.config().unwrap().output_dir, PathBuf::from("videos"));
    }
}
