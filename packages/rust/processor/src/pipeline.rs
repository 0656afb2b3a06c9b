//! The batch pipeline: quality filter → dedupe → language filter →
//! relevance → ranking → enrichment.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use trendpress_shared::{
    AppConfig, BatchId, CandidateContent, ProcessedBatch, ProcessingSummary, ProcessorConfig,
    Result, validate_processor_config,
};

use crate::dedupe::remove_duplicates;
use crate::enrich::enrich_metadata;
use crate::language::detect_language;
use crate::quality::filter_by_quality;
use crate::scoring::{final_score, relevance_score};
use crate::tables::ScoringTables;

/// Ranks one batch of candidates. Owns its thresholds and lookup tables.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    config: ProcessorConfig,
    tables: ScoringTables,
}

impl Processor {
    pub fn new(config: ProcessorConfig, tables: ScoringTables) -> Self {
        Self { config, tables }
    }

    /// Build from the loaded app config, applying table overrides.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        validate_processor_config(&config.processor)?;
        Ok(Self::new(
            config.processor.clone(),
            ScoringTables::with_overrides(&config.tables),
        ))
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    /// Run the full pipeline against the current time.
    pub fn process_results(
        &self,
        candidates: Vec<CandidateContent>,
        keyword: Option<&str>,
    ) -> ProcessedBatch {
        self.process_results_at(candidates, keyword, Utc::now())
    }

    /// Run the full pipeline with a fixed `now` (freshness is the only
    /// time-dependent signal).
    #[instrument(skip_all, fields(total = candidates.len(), keyword = keyword.unwrap_or("")))]
    pub fn process_results_at(
        &self,
        candidates: Vec<CandidateContent>,
        keyword: Option<&str>,
        now: DateTime<Utc>,
    ) -> ProcessedBatch {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());
        let total = candidates.len();

        if candidates.is_empty() {
            warn!("no candidates to process");
            return ProcessedBatch {
                batch_id: BatchId::new(),
                processed: Vec::new(),
                summary: ProcessingSummary::default(),
                keyword: keyword.map(String::from),
                processed_at: now,
            };
        }

        // --- Stage 1: Quality filter ---
        let filtered = filter_by_quality(candidates, &self.config, &self.tables);
        let filtered_count = filtered.len();
        debug!(kept = filtered_count, "quality filter");

        // --- Stage 2: Dedupe ---
        let unique = remove_duplicates(filtered, self.config.similarity_threshold);
        let duplicates = filtered_count - unique.len();
        debug!(kept = unique.len(), duplicates, "dedupe");

        // --- Stage 3: Language filter ---
        let mut ranked: Vec<CandidateContent> = unique
            .into_iter()
            .filter_map(|mut candidate| {
                let language = detect_language(&candidate.content);
                candidate.language = Some(language);
                if self.config.allowed_languages.contains(&language) {
                    Some(candidate)
                } else {
                    debug!(title = candidate.title_str(), %language, "language not allowed");
                    None
                }
            })
            .collect();
        let language_filtered = ranked.len();
        debug!(kept = language_filtered, "language filter");

        // --- Stage 4: Relevance ---
        for candidate in &mut ranked {
            candidate.relevance_score = Some(relevance_score(candidate, keyword, &self.tables));
        }

        // --- Stage 5: Rank ---
        for candidate in &mut ranked {
            candidate.final_score = Some(final_score(candidate, &self.tables, now));
        }
        ranked.sort_by(|a, b| b.final_score.cmp(&a.final_score));

        if let Some(max) = self.config.max_results {
            ranked.truncate(max);
        }

        // --- Stage 6: Enrich ---
        for candidate in &mut ranked {
            candidate.enrichment = Some(enrich_metadata(candidate, &self.config, &self.tables));
        }

        let summary = ProcessingSummary {
            total,
            filtered: filtered_count,
            duplicates,
            language_filtered,
            final_count: ranked.len(),
            avg_quality: average_quality(&ranked),
            top_quality: top_quality(&ranked),
        };

        info!(
            total = summary.total,
            filtered = summary.filtered,
            duplicates = summary.duplicates,
            language_filtered = summary.language_filtered,
            final_count = summary.final_count,
            avg_quality = summary.avg_quality,
            "batch processed"
        );

        ProcessedBatch {
            batch_id: BatchId::new(),
            processed: ranked,
            summary,
            keyword: keyword.map(String::from),
            processed_at: now,
        }
    }
}

fn average_quality(items: &[CandidateContent]) -> u32 {
    if items.is_empty() {
        return 0;
    }
    let sum: f64 = items.iter().map(|c| c.quality.score).sum();
    (sum / items.len() as f64).round().max(0.0) as u32
}

fn top_quality(items: &[CandidateContent]) -> u32 {
    items
        .iter()
        .map(|c| c.quality.score)
        .fold(0.0_f64, f64::max)
        .round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use trendpress_shared::{CandidateMetadata, Language, QualitySignals};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn candidate(title: &str, url: &str, content: &str, score: f64) -> CandidateContent {
        CandidateContent {
            url: Some(url.into()),
            title: Some(title.into()),
            content: content.into(),
            quality: QualitySignals {
                score,
                word_count: 400,
            },
            ..Default::default()
        }
    }

    fn load_fixture() -> Vec<CandidateContent> {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/json/candidates.fixture.json");
        let raw = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&raw).expect("parse fixture")
    }

    #[test]
    fn empty_input_short_circuits() {
        let processor = Processor::default();
        let batch = processor.process_results_at(Vec::new(), Some("rust"), now());
        assert!(batch.processed.is_empty());
        assert_eq!(batch.summary, ProcessingSummary::default());
        assert_eq!(batch.keyword.as_deref(), Some("rust"));
        assert_eq!(batch.processed_at, now());
    }

    #[test]
    fn fixture_runs_through_every_stage() {
        let processor = Processor::default();
        let batch = processor.process_results_at(load_fixture(), Some("rust"), now());

        // casino item and short note fail the quality gate,
        // the two identical Rust posts collapse into one.
        assert_eq!(batch.summary.total, 5);
        assert_eq!(batch.summary.filtered, 3);
        assert_eq!(batch.summary.duplicates, 1);
        assert_eq!(batch.summary.language_filtered, 2);
        assert_eq!(batch.summary.final_count, 2);
        assert_eq!(batch.summary.avg_quality, 71);
        assert_eq!(batch.summary.top_quality, 78);

        let top = &batch.processed[0];
        assert_eq!(top.quality.score, 78.0);
        assert_eq!(top.language, Some(Language::English));
        assert!(top.relevance_score.is_some());
        let meta = top.enrichment.as_ref().expect("enriched");
        assert_eq!(meta.category, "technology");
        assert!(meta.tags.contains(&"rust".to_string()));

        let korean = &batch.processed[1];
        assert_eq!(korean.language, Some(Language::Korean));
    }

    #[test]
    fn ranking_is_descending_by_final_score() {
        let processor = Processor::default();
        let items = vec![
            candidate("low", "http://plain.example/a", "Low effort page. Few facts.", 35.0),
            candidate("high", "https://github.com/b", "Great project page. Many facts.", 95.0),
            candidate("mid", "https://medium.com/c", "Decent essay. Some facts.", 60.0),
        ];
        let batch = processor.process_results_at(items, None, now());
        let scores: Vec<_> = batch.processed.iter().map(|c| c.final_score.unwrap()).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
        assert_eq!(batch.processed[0].title_str(), "high");
    }

    #[test]
    fn language_filter_respects_allowed_set() {
        let config = ProcessorConfig {
            allowed_languages: vec![Language::Korean],
            ..Default::default()
        };
        let processor = Processor::new(config, ScoringTables::default());
        let items = vec![
            candidate("en", "https://a.example", "An English article about databases.", 60.0),
            candidate("ko", "https://b.example", "데이터베이스에 관한 한국어 기사입니다.", 60.0),
        ];
        let batch = processor.process_results_at(items, None, now());
        assert_eq!(batch.summary.language_filtered, 1);
        assert_eq!(batch.processed[0].title_str(), "ko");
    }

    #[test]
    fn max_results_truncates_after_ranking() {
        let config = ProcessorConfig {
            max_results: Some(1),
            ..Default::default()
        };
        let processor = Processor::new(config, ScoringTables::default());
        let items = vec![
            candidate("a", "https://a.example", "First story here. Unique words.", 40.0),
            candidate("b", "https://b.example", "Second story there. Other words.", 90.0),
        ];
        let batch = processor.process_results_at(items, None, now());
        assert_eq!(batch.summary.language_filtered, 2);
        assert_eq!(batch.summary.final_count, 1);
        assert_eq!(batch.processed[0].title_str(), "b");
        assert_eq!(batch.summary.avg_quality, 90);
    }

    #[test]
    fn freshness_feeds_the_ranking() {
        let processor = Processor::default();
        let mut fresh = candidate("fresh", "https://x.example/1", "Fresh news today. Big update.", 60.0);
        fresh.metadata = CandidateMetadata {
            publish_date: Some(now() - Duration::hours(6)),
        };
        let mut stale = candidate("stale", "https://x.example/2", "Old news archive. Nothing new.", 60.0);
        stale.metadata = CandidateMetadata {
            publish_date: Some(now() - Duration::days(400)),
        };

        let batch = processor.process_results_at(vec![stale, fresh], None, now());
        assert_eq!(batch.processed[0].title_str(), "fresh");
        // 24 + 15 + 20 + 6 vs 24 + 15 + 4 + 6
        assert_eq!(batch.processed[0].final_score, Some(65));
        assert_eq!(batch.processed[1].final_score, Some(49));
    }

    #[test]
    fn malformed_fields_score_zero_without_aborting_the_batch() {
        let json = r#"[
            {"title": "broken", "content": "Some body. More text.", "quality": null, "metadata": null},
            {
                "title": "ok",
                "url": "https://a.example/post",
                "content": "A readable article. It has facts.",
                "quality": {"score": 70, "wordCount": 300.0},
                "metadata": {"publishDate": 1700000000000}
            }
        ]"#;
        let items: Vec<CandidateContent> = serde_json::from_str(json).expect("parse candidates");

        let batch = Processor::default().process_results_at(items, None, now());
        assert_eq!(batch.summary.total, 2);
        assert_eq!(batch.summary.filtered, 1);
        assert_eq!(batch.summary.final_count, 1);
        assert_eq!(batch.processed[0].title_str(), "ok");
        // 28 + 15 + 10 (unknown date) + 6
        assert_eq!(batch.processed[0].final_score, Some(59));
    }

    #[test]
    fn malformed_url_is_ranked_with_neutral_authority() {
        let processor = Processor::default();
        let items = vec![
            candidate("bad url", "not a url", "Plain article text. Nothing odd here.", 60.0),
            candidate("plain", "http://plain.example/a", "Another article text. Different words.", 60.0),
        ];
        let batch = processor.process_results_at(items, None, now());
        assert_eq!(batch.summary.final_count, 2);
        // 24 + 15 + 10 + 5 for both
        for candidate in &batch.processed {
            assert_eq!(candidate.final_score, Some(54));
        }
        assert!(batch.processed.iter().any(|c| c.title_str() == "bad url"));
    }

    #[test]
    fn from_app_config_rejects_invalid_threshold() {
        let mut config = AppConfig::default();
        config.processor.similarity_threshold = 0.0;
        assert!(Processor::from_app_config(&config).is_err());
    }
}
