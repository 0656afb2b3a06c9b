//! Trendpress CLI: rank crawled content before it reaches the post generator.
//!
//! Filters, deduplicates and scores candidate content and keyword signals
//! collected by the upstream trend and crawl jobs.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
