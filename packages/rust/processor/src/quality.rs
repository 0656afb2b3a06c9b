//! Quality gate for crawled candidates and standalone quality assessment.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use trendpress_shared::{CandidateContent, ProcessorConfig, QualityFactors};

use crate::tables::ScoringTables;
use crate::text::{contains_term, count_term, searchable_text, sentences, word_count};

// ---------------------------------------------------------------------------
// Quality filter
// ---------------------------------------------------------------------------

/// Whether a candidate clears the minimum score, minimum word count and
/// blacklist checks.
pub fn passes_quality_filter(
    candidate: &CandidateContent,
    config: &ProcessorConfig,
    tables: &ScoringTables,
) -> bool {
    if candidate.quality.score < config.min_quality_score {
        debug!(
            title = candidate.title_str(),
            score = candidate.quality.score,
            "below minimum quality score"
        );
        return false;
    }

    if candidate.quality.word_count < config.min_word_count {
        debug!(
            title = candidate.title_str(),
            word_count = candidate.quality.word_count,
            "below minimum word count"
        );
        return false;
    }

    let text = searchable_text(candidate.title_str(), &candidate.content);
    if let Some(term) = tables.blacklist.iter().find(|t| contains_term(&text, t)) {
        debug!(title = candidate.title_str(), term = %term, "blacklisted term");
        return false;
    }

    true
}

/// Keep only candidates passing [`passes_quality_filter`].
pub fn filter_by_quality(
    candidates: Vec<CandidateContent>,
    config: &ProcessorConfig,
    tables: &ScoringTables,
) -> Vec<CandidateContent> {
    candidates
        .into_iter()
        .filter(|c| passes_quality_filter(c, config, tables))
        .collect()
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

const MAX_WORD_COUNT: f64 = 30.0;
const MAX_STRUCTURE: f64 = 20.0;
const MAX_KEYWORD: f64 = 20.0;
const MAX_READABILITY: f64 = 15.0;
const MAX_DIVERSITY: f64 = 15.0;

/// Score raw text on five clamped factors.
///
/// Used for content that arrives without upstream quality signals.
pub fn assess_quality(text: &str, keyword: Option<&str>) -> QualityFactors {
    let words = word_count(text);

    QualityFactors {
        word_count: word_count_factor(words).min(MAX_WORD_COUNT),
        structure: structure_factor(text).min(MAX_STRUCTURE),
        keyword: keyword_factor(text, words, keyword).min(MAX_KEYWORD),
        readability: readability_factor(text, words).min(MAX_READABILITY),
        diversity: diversity_factor(text, words).clamp(0.0, MAX_DIVERSITY),
    }
}

fn word_count_factor(words: usize) -> f64 {
    match words {
        w if w > 1000 => 30.0,
        w if w > 500 => 20.0,
        w if w > 200 => 10.0,
        _ => 0.0,
    }
}

/// Paragraph breaks and heading/list markers.
fn structure_factor(text: &str) -> f64 {
    static PARAGRAPH_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));
    static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s*(?:#{1,6}\s|[-*•]\s|\d+[.)]\s)").expect("valid regex")
    });

    let paragraphs = PARAGRAPH_RE
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count();
    let markers = MARKER_RE.find_iter(text).count();

    let paragraph_points = match paragraphs {
        p if p >= 5 => 10.0,
        p if p >= 3 => 6.0,
        2 => 3.0,
        _ => 0.0,
    };
    let marker_points = match markers {
        m if m >= 3 => 10.0,
        m if m >= 1 => 5.0,
        _ => 0.0,
    };

    paragraph_points + marker_points
}

/// Keyword density in the body: 1–3% is ideal, above 5% is stuffing.
fn keyword_factor(text: &str, words: usize, keyword: Option<&str>) -> f64 {
    let Some(keyword) = keyword.map(|k| k.trim().to_lowercase()).filter(|k| !k.is_empty())
    else {
        return MAX_KEYWORD / 2.0;
    };
    if words == 0 {
        return 0.0;
    }

    let hits = count_term(&text.to_lowercase(), &keyword);
    if hits == 0 {
        return 0.0;
    }

    let density = hits as f64 / words as f64 * 100.0;
    match density {
        d if (1.0..=3.0).contains(&d) => 20.0,
        d if d <= 5.0 => 12.0,
        _ => 5.0,
    }
}

/// Average sentence length: 8–25 words reads best.
fn readability_factor(text: &str, words: usize) -> f64 {
    let sentence_count = sentences(text).count();
    if sentence_count == 0 || words == 0 {
        return 0.0;
    }

    let avg = words as f64 / sentence_count as f64;
    if (8.0..=25.0).contains(&avg) {
        15.0
    } else if (5.0..=35.0).contains(&avg) {
        10.0
    } else {
        5.0
    }
}

/// Share of distinct words, scaled to the factor range.
fn diversity_factor(text: &str, words: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }

    let unique: HashSet<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    unique.len() as f64 / words as f64 * MAX_DIVERSITY
}
