//! End-to-end batch run: JSON file → processor → ranked batch (→ JSON file).

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use trendpress_processor::Processor;
use trendpress_shared::{
    AppConfig, CandidateContent, KeywordSignal, ProcessedBatch, Result, TrendpressError,
};

/// Configuration for the `run_batch` pipeline.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// JSON array of candidates produced by the crawler.
    pub input: PathBuf,
    /// Where to write the processed batch, if anywhere.
    pub output: Option<PathBuf>,
    /// Target keyword for relevance scoring.
    pub keyword: Option<String>,
    /// Loaded application config (thresholds and table overrides).
    pub app: AppConfig,
}

/// Result of the `run_batch` pipeline.
#[derive(Debug)]
pub struct BatchResult {
    pub batch: ProcessedBatch,
    /// Path the batch was written to.
    pub output_path: Option<PathBuf>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &BatchResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &BatchResult) {}
}

/// Run one batch.
///
/// 1. Load candidates
/// 2. Filter, dedupe, score, rank and enrich
/// 3. Write the processed batch (if an output path is set)
#[instrument(skip_all, fields(input = %config.input.display()))]
pub async fn run_batch(
    config: &BatchConfig,
    progress: &dyn ProgressReporter,
) -> Result<BatchResult> {
    let start = Instant::now();
    let processor = Processor::from_app_config(&config.app)?;

    // --- Phase 1: Load ---
    progress.phase("Loading candidates");
    let candidates = load_candidates(&config.input).await?;
    info!(count = candidates.len(), "candidates loaded");

    // --- Phase 2: Process ---
    progress.phase("Ranking candidates");
    let batch = processor.process_results(candidates, config.keyword.as_deref());

    // --- Phase 3: Write ---
    if let Some(path) = &config.output {
        progress.phase("Writing processed batch");
        write_batch(path, &batch).await?;
    }

    let result = BatchResult {
        batch,
        output_path: config.output.clone(),
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        batch_id = %result.batch.batch_id,
        final_count = result.batch.summary.final_count,
        elapsed_ms = result.elapsed.as_millis(),
        "batch run complete"
    );

    Ok(result)
}

/// Read a JSON array of candidates.
pub async fn load_candidates(path: &Path) -> Result<Vec<CandidateContent>> {
    read_json(path).await
}

/// Read a JSON array of keyword signals.
pub async fn load_signals(path: &Path) -> Result<Vec<KeywordSignal>> {
    read_json(path).await
}

/// Write a processed batch as pretty JSON, creating parent directories.
pub async fn write_batch(path: &Path, batch: &ProcessedBatch) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| TrendpressError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(batch)
        .map_err(|e| TrendpressError::parse(format!("serialize batch: {e}")))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| TrendpressError::io(path, e))?;

    info!(path = %path.display(), "processed batch written");
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TrendpressError::io(path, e))?;

    serde_json::from_str(&raw)
        .map_err(|e| TrendpressError::parse(format!("{}: {e}", path.display())))
}
