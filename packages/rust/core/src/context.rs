//! Prompt context for the downstream post generator.

use serde::Serialize;

use trendpress_shared::ProcessedBatch;

/// One ranked candidate, trimmed for inclusion in a generation prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnippet {
    /// 1-based rank within the batch.
    pub rank: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub excerpt: String,
    pub final_score: u32,
}

/// Take the first `top_k` ranked candidates with excerpts of at most
/// `excerpt_chars` characters (plus an ellipsis when cut).
pub fn select_context(
    batch: &ProcessedBatch,
    top_k: usize,
    excerpt_chars: usize,
) -> Vec<ContextSnippet> {
    batch
        .processed
        .iter()
        .take(top_k)
        .enumerate()
        .map(|(i, candidate)| ContextSnippet {
            rank: i + 1,
            title: candidate.title_str().to_string(),
            url: candidate.url.clone(),
            excerpt: excerpt(&candidate.content, excerpt_chars),
            final_score: candidate.final_score.unwrap_or(0),
        })
        .collect()
}

/// Render snippets as a Markdown list for a prompt.
pub fn render_context(snippets: &[ContextSnippet]) -> String {
    let mut out = String::new();
    for s in snippets {
        out.push_str(&format!("{}. **{}**", s.rank, s.title));
        if let Some(url) = &s.url {
            out.push_str(&format!(" ({url})"));
        }
        out.push('\n');
        if !s.excerpt.is_empty() {
            out.push_str(&format!("   {}\n", s.excerpt));
        }
    }
    out
}

/// Collapse whitespace and cut to `max_chars` on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", collapsed[..idx].trim_end()),
        None => collapsed,
    }
}
