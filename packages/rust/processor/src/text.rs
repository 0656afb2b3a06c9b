//! Small text helpers shared by the scoring passes.

/// Whitespace-separated word count.
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentences split on `.`, `!` and `?`, trimmed, empties dropped.
pub(crate) fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Count occurrences of `term` in `haystack` (both expected lowercase).
///
/// Terms that start or end with an ASCII letter/digit only match on an ASCII
/// word boundary at that edge, so `ai` does not match inside `said`. Hangul
/// terms match as plain substrings because Korean attaches particles
/// directly to the word (`러스트는`).
pub(crate) fn count_term(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }

    let bounded_start = term.starts_with(|c: char| c.is_ascii_alphanumeric());
    let bounded_end = term.ends_with(|c: char| c.is_ascii_alphanumeric());

    haystack
        .match_indices(term)
        .filter(|(start, _)| {
            let end = start + term.len();
            let before_ok = !bounded_start
                || haystack[..*start]
                    .chars()
                    .next_back()
                    .is_none_or(|c| !c.is_ascii_alphanumeric());
            let after_ok = !bounded_end
                || haystack[end..]
                    .chars()
                    .next()
                    .is_none_or(|c| !c.is_ascii_alphanumeric());
            before_ok && after_ok
        })
        .count()
}

/// Whether `term` occurs at least once (see [`count_term`]).
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    count_term(haystack, term) > 0
}

/// Lowercased `title + "\n" + content`, the haystack for table lookups.
pub(crate) fn searchable_text(title: &str, content: &str) -> String {
    let mut text = String::with_capacity(title.len() + content.len() + 1);
    text.push_str(title);
    text.push('\n');
    text.push_str(content);
    text.to_lowercase()
}
