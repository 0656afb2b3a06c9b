//! Metadata attached to ranked candidates: reading time, tags, sentiment
//! and category. All of it is rule-table matching, not NLP.

use trendpress_shared::{CandidateContent, CategoryEntry, ContentMetadata, ProcessorConfig, Sentiment};

use crate::tables::ScoringTables;
use crate::text::{contains_term, count_term, searchable_text, word_count};

/// Category used when no rule gets a vote.
pub const GENERAL_CATEGORY: &str = "general";

/// Build the enrichment block for one candidate.
pub fn enrich_metadata(
    candidate: &CandidateContent,
    config: &ProcessorConfig,
    tables: &ScoringTables,
) -> ContentMetadata {
    let text = searchable_text(candidate.title_str(), &candidate.content);

    ContentMetadata {
        reading_time_minutes: reading_time_minutes(
            word_count(&candidate.content),
            config.words_per_minute,
        ),
        tags: extract_tags(&text, &tables.tags, config.max_tags),
        sentiment: analyze_sentiment(&text, &tables.positive_words, &tables.negative_words),
        category: infer_category(&text, &tables.categories),
    }
}

/// Whole minutes at `words_per_minute`, rounded up, never below 1.
pub fn reading_time_minutes(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    words.div_ceil(wpm).max(1) as u32
}

/// Known terms present in `text`, in table order, at most `max`.
pub fn extract_tags(text: &str, tags: &[String], max: usize) -> Vec<String> {
    let text = text.to_lowercase();
    tags.iter()
        .filter(|tag| contains_term(&text, tag))
        .take(max)
        .cloned()
        .collect()
}

/// Compare positive and negative word counts.
pub fn analyze_sentiment(text: &str, positive: &[String], negative: &[String]) -> Sentiment {
    let text = text.to_lowercase();
    let count = |words: &[String]| -> usize { words.iter().map(|w| count_term(&text, w)).sum() };

    let pos = count(positive);
    let neg = count(negative);

    match pos.cmp(&neg) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Category with the most keyword occurrences; earlier entries win ties,
/// [`GENERAL_CATEGORY`] when nothing matches.
pub fn infer_category(text: &str, categories: &[CategoryEntry]) -> String {
    let text = text.to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for category in categories {
        let votes: usize = category
            .keywords
            .iter()
            .map(|k| count_term(&text, k))
            .sum();
        if votes > 0 && best.is_none_or(|(_, v)| votes > v) {
            best = Some((category.name.as_str(), votes));
        }
    }

    best.map(|(name, _)| name.to_string())
        .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
}
