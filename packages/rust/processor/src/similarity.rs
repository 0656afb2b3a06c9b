//! Sentence-set Jaccard similarity.

use std::collections::HashSet;

use crate::text::sentences;

/// Jaccard index over the lowercased sentence sets of `a` and `b`.
///
/// Sentences are split on `.`, `!` and `?`. Returns `0.0` when neither text
/// has a sentence.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let left = sentence_set(a);
    let right = sentence_set(b);

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = left.intersection(&right).count();
    intersection as f64 / union as f64
}

fn sentence_set(text: &str) -> HashSet<String> {
    sentences(text).map(str::to_lowercase).collect()
}
