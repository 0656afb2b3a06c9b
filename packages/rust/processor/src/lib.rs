//! Content-quality scoring, deduplication and ranking for Trendpress.
//!
//! Candidates crawled upstream pass through a single synchronous pipeline
//! ([`Processor::process_results`]) before their titles and excerpts are
//! handed to the post generator. The individual passes are public so callers
//! can score or compare content outside a batch.

pub mod dedupe;
pub mod enrich;
pub mod keywords;
pub mod language;
pub mod pipeline;
pub mod quality;
pub mod scoring;
pub mod similarity;
pub mod tables;
mod text;

pub use dedupe::remove_duplicates;
pub use enrich::{enrich_metadata, infer_category};
pub use keywords::merge_keywords;
pub use language::detect_language;
pub use pipeline::Processor;
pub use quality::{assess_quality, filter_by_quality, passes_quality_filter};
pub use scoring::{authority_score, final_score, freshness_score, relevance_score};
pub use similarity::text_similarity;
pub use tables::ScoringTables;
