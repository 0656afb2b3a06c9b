//! Shared types, error model, and configuration for Trendpress.
//!
//! This crate is the foundation depended on by all other Trendpress crates.
//! It provides:
//! - [`TrendpressError`]: the unified error type
//! - Domain types ([`CandidateContent`], [`ProcessedBatch`], [`ScoredKeyword`], [`QualityFactors`])
//! - Configuration ([`AppConfig`], [`ProcessorConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CategoryEntry, ContextConfig, ProcessorConfig, TablesConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, validate_processor_config,
};
pub use error::{Result, TrendpressError};
pub use types::{
    BatchId, CandidateContent, CandidateMetadata, ContentMetadata, KeywordSignal, Language,
    ProcessedBatch, ProcessingSummary, QualityFactors, QualitySignals, ScoredKeyword, Sentiment,
};
