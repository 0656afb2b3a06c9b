//! Greedy near-duplicate removal.

use tracing::debug;

use trendpress_shared::CandidateContent;

use crate::similarity::text_similarity;

/// Remove near-duplicate candidates, keeping the higher-quality copy.
///
/// Each incoming item is compared against every item accepted so far. The
/// accepted item with the highest similarity above `threshold` (the first one
/// on ties) is its best match. The incoming item replaces that single slot
/// when its `quality.score` is strictly higher and is dropped otherwise;
/// other matching slots are left alone. Items with no match are appended.
///
/// The result depends on input order.
pub fn remove_duplicates(items: Vec<CandidateContent>, threshold: f64) -> Vec<CandidateContent> {
    let mut accepted: Vec<CandidateContent> = Vec::with_capacity(items.len());

    for item in items {
        let mut best: Option<(usize, f64)> = None;
        for (idx, existing) in accepted.iter().enumerate() {
            let similarity = text_similarity(&item.content, &existing.content);
            if similarity > threshold && best.is_none_or(|(_, s)| similarity > s) {
                best = Some((idx, similarity));
            }
        }

        match best {
            Some((idx, similarity)) => {
                if item.quality.score > accepted[idx].quality.score {
                    debug!(
                        replaced = accepted[idx].title_str(),
                        by = item.title_str(),
                        similarity,
                        "duplicate with higher quality replaces accepted item"
                    );
                    accepted[idx] = item;
                } else {
                    debug!(
                        dropped = item.title_str(),
                        kept = accepted[idx].title_str(),
                        similarity,
                        "duplicate dropped"
                    );
                }
            }
            None => accepted.push(item),
        }
    }

    accepted
}
