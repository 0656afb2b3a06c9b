//! Merge keyword signals from several upstream sources into one ranked list.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use trendpress_shared::{KeywordSignal, ScoredKeyword};

use crate::enrich::infer_category;
use crate::tables::ScoringTables;
use crate::text::contains_term;

/// Score bonus for every additional source reporting the same keyword.
const CROSS_SOURCE_BONUS: f64 = 5.0;

struct Merged {
    score: f64,
    source: String,
    growth: Option<f64>,
    sources: BTreeSet<String>,
}

/// Deduplicate signals by normalized keyword and rank them.
///
/// The highest-scoring signal for a keyword supplies its score and source;
/// each extra distinct source adds [`CROSS_SOURCE_BONUS`] (capped at 100).
/// Growth is the maximum reported. Blank and blacklisted keywords are dropped.
#[instrument(skip_all, fields(signals = signals.len()))]
pub fn merge_keywords(
    signals: Vec<KeywordSignal>,
    tables: &ScoringTables,
    limit: Option<usize>,
) -> Vec<ScoredKeyword> {
    let mut merged: BTreeMap<String, Merged> = BTreeMap::new();

    for signal in signals {
        let keyword = signal.keyword.trim().to_lowercase();
        if keyword.is_empty() {
            continue;
        }
        if tables.blacklist.iter().any(|term| contains_term(&keyword, term)) {
            debug!(keyword, "blacklisted keyword dropped");
            continue;
        }

        let score = signal.score.clamp(0.0, 100.0);
        let source_key = signal.source.trim().to_lowercase();

        merged
            .entry(keyword)
            .and_modify(|m| {
                if score > m.score {
                    m.score = score;
                    m.source = signal.source.clone();
                }
                m.growth = max_option(m.growth, signal.growth);
                m.sources.insert(source_key.clone());
            })
            .or_insert_with(|| Merged {
                score,
                source: signal.source.clone(),
                growth: signal.growth,
                sources: BTreeSet::from([source_key.clone()]),
            });
    }

    let mut ranked: Vec<ScoredKeyword> = merged
        .into_iter()
        .map(|(keyword, m)| {
            let bonus = CROSS_SOURCE_BONUS * m.sources.len().saturating_sub(1) as f64;
            ScoredKeyword {
                category: infer_category(&keyword, &tables.categories),
                score: (m.score + bonus).min(100.0),
                growth: m.growth,
                source: m.source,
                keyword,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    debug!(keywords = ranked.len(), "keywords merged");
    ranked
}

fn max_option(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}
