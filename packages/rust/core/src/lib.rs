//! Batch orchestration for Trendpress.
//!
//! Loads crawler output from disk, runs it through the processor, writes the
//! ranked batch back out, and selects the context handed to the generator.

pub mod batch;
pub mod context;
