//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use trendpress_core::batch::{BatchConfig, BatchResult, ProgressReporter};
use trendpress_core::context::{render_context, select_context};
use trendpress_processor::{ScoringTables, assess_quality, merge_keywords};
use trendpress_shared::{AppConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Trendpress: rank crawled content for automated blog posts.
#[derive(Parser)]
#[command(
    name = "trendpress",
    version,
    about = "Filter, deduplicate and rank crawled content and trending keywords.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.trendpress/trendpress.toml).
    #[arg(long, global = true, env = "TRENDPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Rank a batch of crawled candidates.
    Process {
        /// JSON array of candidates.
        #[arg(short, long)]
        input: PathBuf,

        /// Target keyword for relevance scoring.
        #[arg(short, long)]
        keyword: Option<String>,

        /// Write the processed batch to this file.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Number of context snippets to print (defaults to [context].top_k).
        #[arg(long)]
        top: Option<usize>,
    },

    /// Merge keyword signals from several sources.
    Keywords {
        /// JSON array of keyword signals.
        #[arg(short, long)]
        input: PathBuf,

        /// Keep at most this many keywords.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Score a plain text file on the quality factors.
    Assess {
        /// Text file to assess.
        #[arg(short, long)]
        input: PathBuf,

        /// Target keyword for the keyword-density factor.
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "trendpress=info",
        1 => "trendpress=debug",
        _ => "trendpress=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone();
    match cli.command {
        Command::Process {
            input,
            keyword,
            out,
            top,
        } => cmd_process(config_path.as_deref(), input, keyword, out, top).await,
        Command::Keywords { input, limit } => {
            cmd_keywords(config_path.as_deref(), &input, limit).await
        }
        Command::Assess { input, keyword } => cmd_assess(&input, keyword.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path.as_deref()).await,
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    })
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_process(
    config_path: Option<&Path>,
    input: PathBuf,
    keyword: Option<String>,
    out: Option<PathBuf>,
    top: Option<usize>,
) -> Result<()> {
    let app = resolve_config(config_path)?;
    let top_k = top.unwrap_or(app.context.top_k);
    let excerpt_chars = app.context.excerpt_chars;

    info!(
        input = %input.display(),
        keyword = keyword.as_deref().unwrap_or(""),
        "processing batch"
    );

    let batch_config = BatchConfig {
        input,
        output: out,
        keyword,
        app,
    };

    let reporter = CliProgress::new();
    let result = trendpress_core::batch::run_batch(&batch_config, &reporter).await?;
    let summary = &result.batch.summary;

    println!();
    println!("  Batch processed");
    println!("  ID:          {}", result.batch.batch_id);
    println!("  Total:       {}", summary.total);
    println!("  Quality ok:  {}", summary.filtered);
    println!("  Duplicates:  {}", summary.duplicates);
    println!("  Language ok: {}", summary.language_filtered);
    println!("  Final:       {}", summary.final_count);
    println!("  Avg quality: {}", summary.avg_quality);
    println!("  Top quality: {}", summary.top_quality);
    if let Some(path) = &result.output_path {
        println!("  Output:      {}", path.display());
    }
    println!("  Time:        {:.1}s", result.elapsed.as_secs_f64());
    println!();

    let snippets = select_context(&result.batch, top_k, excerpt_chars);
    if !snippets.is_empty() {
        println!("{}", render_context(&snippets));
    }

    Ok(())
}

async fn cmd_keywords(config_path: Option<&Path>, input: &Path, limit: Option<usize>) -> Result<()> {
    let app = resolve_config(config_path)?;
    let tables = ScoringTables::with_overrides(&app.tables);

    let signals = trendpress_core::batch::load_signals(input).await?;
    info!(signals = signals.len(), "merging keyword signals");

    let keywords = merge_keywords(signals, &tables, limit);
    println!("{}", serde_json::to_string_pretty(&keywords)?);
    Ok(())
}

async fn cmd_assess(input: &Path, keyword: Option<&str>) -> Result<()> {
    let text = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| eyre!("cannot read '{}': {e}", input.display()))?;

    let factors = assess_quality(&text, keyword);
    println!("{}", serde_json::to_string_pretty(&factors)?);
    println!("score: {:.0}", factors.total());
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _result: &BatchResult) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_process_command() {
        let cli = Cli::try_parse_from([
            "trendpress",
            "process",
            "--input",
            "candidates.json",
            "--keyword",
            "rust",
            "--top",
            "3",
            "-vv",
        ])
        .expect("parse");

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Process {
                input, keyword, top, out,
            } => {
                assert_eq!(input, PathBuf::from("candidates.json"));
                assert_eq!(keyword.as_deref(), Some("rust"));
                assert_eq!(top, Some(3));
                assert!(out.is_none());
            }
            _ => panic!("expected process command"),
        }
    }
}
