//! Application configuration for Trendpress.
//!
//! User config lives at `~/.trendpress/trendpress.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendpressError};
use crate::types::Language;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "trendpress.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".trendpress";

// ---------------------------------------------------------------------------
// Config structs (matching trendpress.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Filtering and ranking thresholds.
    #[serde(default)]
    pub processor: ProcessorConfig,

    /// Overrides for the built-in scoring tables.
    #[serde(default)]
    pub tables: TablesConfig,

    /// Generator context selection.
    #[serde(default)]
    pub context: ContextConfig,
}

/// `[processor]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Candidates with a lower upstream `quality.score` are dropped.
    #[serde(default = "default_min_quality_score")]
    pub min_quality_score: f64,

    /// Candidates with a lower upstream `quality.wordCount` are dropped.
    #[serde(default = "default_min_word_count")]
    pub min_word_count: usize,

    /// Jaccard similarity above which two candidates are duplicates.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Languages kept by the language filter.
    #[serde(default = "default_allowed_languages")]
    pub allowed_languages: Vec<Language>,

    /// Keep only the top N ranked candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,

    /// Reading speed used for the reading-time estimate.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// Maximum number of tags attached per candidate.
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            min_quality_score: default_min_quality_score(),
            min_word_count: default_min_word_count(),
            similarity_threshold: default_similarity_threshold(),
            allowed_languages: default_allowed_languages(),
            max_results: None,
            words_per_minute: default_words_per_minute(),
            max_tags: default_max_tags(),
        }
    }
}

fn default_min_quality_score() -> f64 {
    30.0
}
fn default_min_word_count() -> usize {
    100
}
fn default_similarity_threshold() -> f64 {
    0.8
}
fn default_allowed_languages() -> Vec<Language> {
    vec![Language::Korean, Language::English]
}
fn default_words_per_minute() -> u32 {
    200
}
fn default_max_tags() -> usize {
    5
}

/// A named category and the terms that vote for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

/// `[tables]` section. Any table left out keeps its built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<Vec<String>>,

    /// Keyword → related keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<BTreeMap<String, Vec<String>>>,

    /// Hostname → authority score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_authority: Option<BTreeMap<String, f64>>,

    /// Ordered; earlier entries win ties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_words: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_words: Option<Vec<String>>,
}

/// `[context]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Number of ranked candidates handed to the generator.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum excerpt length in characters.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

fn default_top_k() -> usize {
    5
}
fn default_excerpt_chars() -> usize {
    300
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.trendpress/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TrendpressError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.trendpress/trendpress.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TrendpressError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        TrendpressError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_processor_config(&config.processor)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TrendpressError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TrendpressError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TrendpressError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject thresholds the pipeline cannot work with.
pub fn validate_processor_config(config: &ProcessorConfig) -> Result<()> {
    let threshold = config.similarity_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(TrendpressError::validation(format!(
            "similarity_threshold {threshold} must be in (0, 1]"
        )));
    }
    if config.allowed_languages.is_empty() {
        return Err(TrendpressError::validation(
            "allowed_languages must name at least one language",
        ));
    }
    if config.words_per_minute == 0 {
        return Err(TrendpressError::validation(
            "words_per_minute must be greater than zero",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("min_quality_score"));
        assert!(toml_str.contains("similarity_threshold"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.processor.min_word_count, 100);
        assert_eq!(parsed.processor.similarity_threshold, 0.8);
        assert_eq!(
            parsed.processor.allowed_languages,
            vec![Language::Korean, Language::English]
        );
        assert_eq!(parsed.context.top_k, 5);
    }

    #[test]
    fn config_with_table_overrides() {
        let toml_str = r#"
[processor]
min_quality_score = 50
allowed_languages = ["ko"]
max_results = 10

[tables]
blacklist = ["casino"]

[tables.domain_authority]
"example.org" = 88

[[tables.categories]]
name = "gaming"
keywords = ["console", "steam"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.processor.min_quality_score, 50.0);
        assert_eq!(config.processor.max_results, Some(10));
        assert_eq!(config.processor.allowed_languages, vec![Language::Korean]);
        assert_eq!(config.tables.blacklist.as_deref(), Some(&["casino".to_string()][..]));
        assert_eq!(
            config.tables.domain_authority.as_ref().and_then(|m| m.get("example.org")),
            Some(&88.0)
        );
        let categories = config.tables.categories.expect("categories");
        assert_eq!(categories[0].name, "gaming");
        assert!(config.tables.synonyms.is_none());
    }

    #[test]
    fn load_config_from_rejects_bad_threshold() {
        let path = std::env::temp_dir().join(format!(
            "trendpress-config-{}.toml",
            uuid::Uuid::now_v7()
        ));
        std::fs::write(&path, "[processor]\nsimilarity_threshold = 1.5\n").expect("write");

        let result = load_config_from(&path);
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("similarity_threshold"));
    }

    #[test]
    fn validation_rejects_empty_languages_and_zero_wpm() {
        let mut config = ProcessorConfig::default();
        assert!(validate_processor_config(&config).is_ok());

        config.allowed_languages.clear();
        assert!(validate_processor_config(&config).is_err());

        let config = ProcessorConfig {
            words_per_minute: 0,
            ..Default::default()
        };
        assert!(validate_processor_config(&config).is_err());
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = load_config_from(Path::new("/nonexistent/trendpress.toml")).unwrap_err();
        assert!(matches!(err, TrendpressError::Io { .. }));
    }
}
