//! Core domain types for Trendpress batches.
//!
//! Candidate JSON is produced by the upstream collectors, which emit
//! camelCase field names; every type here mirrors that wire shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// BatchId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for batch run identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub Uuid);

impl BatchId {
    /// Generate a new time-sortable batch identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// CandidateContent
// ---------------------------------------------------------------------------

/// Upstream quality signals attached by the crawler.
///
/// A candidate without a usable `quality` object gets `score: 0, wordCount: 0`.
/// Non-numeric values read as 0; fractional word counts are truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySignals {
    #[serde(default, deserialize_with = "lenient::score")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub word_count: usize,
}

/// Crawler-provided metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMetadata {
    /// Publish date. Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates;
    /// anything else (numbers included) is treated as unknown.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::date"
    )]
    pub publish_date: Option<DateTime<Utc>>,
}

/// Detected language of a candidate's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "en")]
    English,
    Mixed,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" => Ok(Self::Korean),
            "en" => Ok(Self::English),
            "mixed" => Ok(Self::Mixed),
            other => Err(format!("unknown language code '{other}'")),
        }
    }
}

/// Naive word-count sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Metadata attached in the final enrichment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    /// Estimated reading time in whole minutes (at least 1).
    pub reading_time_minutes: u32,
    /// Known terms found in the text, in table order.
    pub tags: Vec<String>,
    pub sentiment: Sentiment,
    /// Best-voted category, or `general`.
    pub category: String,
}

/// A single crawled/fetched item being scored before use as generation context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw body text.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub quality: QualitySignals,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub metadata: CandidateMetadata,
    /// Keyword relevance in [0, 100], set by the scoring stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    /// Weighted composite in [0, 100], set by the ranking stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<ContentMetadata>,
}

impl CandidateContent {
    /// Title, or the empty string when the crawler found none.
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// QualityFactors
// ---------------------------------------------------------------------------

/// Sub-scores of a standalone quality assessment.
///
/// Each field is already clamped to its range: word_count 0–30,
/// structure 0–20, keyword 0–20, readability 0–15, diversity 0–15.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityFactors {
    pub word_count: f64,
    pub structure: f64,
    pub keyword: f64,
    pub readability: f64,
    pub diversity: f64,
}

impl QualityFactors {
    /// Overall score in [0, 100].
    pub fn total(&self) -> f64 {
        (self.word_count + self.structure + self.keyword + self.readability + self.diversity)
            .clamp(0.0, 100.0)
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// A raw keyword signal from one upstream source (trends feed, Reddit, news).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSignal {
    pub keyword: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<f64>,
    pub source: String,
}

/// A keyword merged across sources, ready for topic selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredKeyword {
    /// Normalized (trimmed, lowercased) keyword.
    pub keyword: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<f64>,
    /// Source of the highest-scoring signal.
    pub source: String,
    pub category: String,
}

// ---------------------------------------------------------------------------
// ProcessedBatch
// ---------------------------------------------------------------------------

/// Counts recorded at each filtering stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingSummary {
    /// Candidates received.
    pub total: usize,
    /// Candidates surviving the quality filter.
    pub filtered: usize,
    /// Candidates removed as near-duplicates.
    pub duplicates: usize,
    /// Candidates surviving the language filter.
    pub language_filtered: usize,
    /// Candidates returned.
    #[serde(rename = "final")]
    pub final_count: usize,
    /// Rounded mean `quality.score` of the returned candidates.
    pub avg_quality: u32,
    /// Highest `quality.score` among the returned candidates (rounded).
    pub top_quality: u32,
}

/// Output of one `process_results` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedBatch {
    pub batch_id: BatchId,
    /// Ranked candidates, best first.
    pub processed: Vec<CandidateContent>,
    pub summary: ProcessingSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub processed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Crawler output is loosely typed. A single malformed field degrades to its
/// default instead of rejecting the whole batch.
mod lenient {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `null` or a value of the wrong shape becomes `T::default()`.
    pub(super) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub(super) fn score<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0))
    }

    pub(super) fn count<'de, D>(deserializer: D) -> Result<usize, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let count = match value.as_u64() {
            Some(n) => n,
            None => value
                .as_f64()
                .filter(|v| v.is_finite() && *v > 0.0)
                .map_or(0, |v| v.trunc() as u64),
        };
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    pub(super) fn date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().and_then(parse_date))
    }

    pub(super) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
