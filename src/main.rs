use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ivysilani_dl::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize tracing; progress goes to stdout, logs stay on stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directives()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting ivysilani-dl v{}", env!("CARGO_PKG_VERSION"));

    // Handle the command
    cli.run().await?;

    Ok(())
}
