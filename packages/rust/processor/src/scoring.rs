//! Relevance, freshness, authority and the weighted final score.
//!
//! Every sub-score lives in [0, 100]. The final score weights them
//! 0.4 quality / 0.3 relevance / 0.2 freshness / 0.1 authority.

use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

use trendpress_shared::CandidateContent;

use crate::tables::ScoringTables;
use crate::text::word_count;

/// Relevance when no target keyword is given.
pub const NEUTRAL_RELEVANCE: f64 = 50.0;
/// Freshness when the publish date is unknown.
pub const NEUTRAL_FRESHNESS: f64 = 50.0;
/// Authority for hosts outside the domain table (and for missing/bad URLs).
pub const BASE_AUTHORITY: f64 = 50.0;
const HTTPS_BONUS: f64 = 10.0;

const QUALITY_WEIGHT: f64 = 0.4;
const RELEVANCE_WEIGHT: f64 = 0.3;
const FRESHNESS_WEIGHT: f64 = 0.2;
const AUTHORITY_WEIGHT: f64 = 0.1;

/// Keyword relevance of a candidate in [0, 100].
///
/// +10 per title occurrence, +2 per body occurrence, +20 when body keyword
/// density is within 1–5% (else +10 for any occurrence), +5 per related
/// keyword present. Matching is a case-insensitive literal search.
pub fn relevance_score(
    candidate: &CandidateContent,
    keyword: Option<&str>,
    tables: &ScoringTables,
) -> f64 {
    let Some(keyword) = keyword.map(|k| k.trim().to_lowercase()).filter(|k| !k.is_empty())
    else {
        return NEUTRAL_RELEVANCE;
    };

    let title = candidate.title_str().to_lowercase();
    let body = candidate.content.to_lowercase();

    let title_hits = title.matches(keyword.as_str()).count();
    let body_hits = body.matches(keyword.as_str()).count();

    let mut score = (title_hits * 10 + body_hits * 2) as f64;

    let words = word_count(&candidate.content);
    let density = if words > 0 {
        body_hits as f64 / words as f64 * 100.0
    } else {
        0.0
    };

    if (1.0..=5.0).contains(&density) {
        score += 20.0;
    } else if title_hits + body_hits > 0 {
        score += 10.0;
    }

    if let Some(related) = tables.synonyms.get(&keyword) {
        let hits = related
            .iter()
            .filter(|term| title.contains(term.as_str()) || body.contains(term.as_str()))
            .count();
        score += hits as f64 * 5.0;
    }

    score.min(100.0)
}

/// Recency score banded by age in days.
///
/// ≤1 day → 100, ≤7 → 80, ≤30 → 60, ≤90 → 40, older → 20, unknown → 50.
pub fn freshness_score(publish_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(published) = publish_date else {
        return NEUTRAL_FRESHNESS;
    };

    let age_days = (now - published).num_seconds() as f64 / 86_400.0;
    match age_days {
        d if d <= 1.0 => 100.0,
        d if d <= 7.0 => 80.0,
        d if d <= 30.0 => 60.0,
        d if d <= 90.0 => 40.0,
        _ => 20.0,
    }
}

/// Trust score from the domain table, else 50 plus 10 for HTTPS.
///
/// Missing or unparseable URLs get the base score.
pub fn authority_score(url: Option<&str>, tables: &ScoringTables) -> f64 {
    let Some(raw) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return BASE_AUTHORITY;
    };

    let parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(url = raw, error = %e, "unparseable URL, using base authority");
            return BASE_AUTHORITY;
        }
    };

    if let Some(score) = parsed
        .host_str()
        .and_then(|host| tables.authority_for_host(&host.to_lowercase()))
    {
        return score;
    }

    if parsed.scheme() == "https" {
        BASE_AUTHORITY + HTTPS_BONUS
    } else {
        BASE_AUTHORITY
    }
}

/// Weighted composite in [0, 100].
///
/// Uses the candidate's upstream `quality.score` and its stored
/// `relevance_score` (0 when unset); each input is clamped first.
pub fn final_score(candidate: &CandidateContent, tables: &ScoringTables, now: DateTime<Utc>) -> u32 {
    let quality = candidate.quality.score.clamp(0.0, 100.0);
    let relevance = candidate.relevance_score.unwrap_or(0.0).clamp(0.0, 100.0);
    let freshness = freshness_score(candidate.metadata.publish_date, now);
    let authority = authority_score(candidate.url.as_deref(), tables).clamp(0.0, 100.0);

    let weighted = QUALITY_WEIGHT * quality
        + RELEVANCE_WEIGHT * relevance
        + FRESHNESS_WEIGHT * freshness
        + AUTHORITY_WEIGHT * authority;

    weighted.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use trendpress_shared::{CandidateMetadata, QualitySignals};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn candidate(title: &str, content: &str) -> CandidateContent {
        CandidateContent {
            title: Some(title.into()),
            content: content.into(),
            ..Default::default()
        }
    }

    // --- Relevance ---

    #[test]
    fn relevance_without_keyword_is_neutral() {
        let tables = ScoringTables::default();
        let c = candidate("Anything", "Some body text.");
        assert_eq!(relevance_score(&c, None, &tables), NEUTRAL_RELEVANCE);
        assert_eq!(relevance_score(&c, Some("   "), &tables), NEUTRAL_RELEVANCE);
    }

    #[test]
    fn relevance_counts_title_body_and_density() {
        let tables = ScoringTables::default();
        // 50 body words, 2 of them "kotlin" → density 4%.
        let mut body = vec!["word"; 48];
        body.extend(["Kotlin", "kotlin"]);
        let c = candidate("Kotlin tips for Kotlin fans", &body.join(" "));

        // title 2×10 + body 2×2 + density 20
        assert_eq!(relevance_score(&c, Some("Kotlin"), &tables), 44.0);
    }

    #[test]
    fn relevance_outside_density_band_gets_match_bonus() {
        let tables = ScoringTables::default();
        // 1 hit in 200 words → 0.5%.
        let mut body = vec!["filler"; 199];
        body.push("kotlin");
        let c = candidate("Nothing here", &body.join(" "));
        assert_eq!(relevance_score(&c, Some("kotlin"), &tables), 12.0);

        let miss = candidate("Nothing here", "no match at all");
        assert_eq!(relevance_score(&miss, Some("kotlin"), &tables), 0.0);
    }

    #[test]
    fn relevance_rewards_related_keywords() {
        let tables = ScoringTables::default();
        let c = candidate("Shipping", "We use cargo and every crate we can find.");
        // No direct hit; "cargo" and "crate" are related to "rust".
        assert_eq!(relevance_score(&c, Some("rust"), &tables), 10.0);
    }

    #[test]
    fn relevance_is_capped() {
        let tables = ScoringTables::default();
        let c = candidate(&"rust ".repeat(20), &"rust ".repeat(20));
        assert_eq!(relevance_score(&c, Some("rust"), &tables), 100.0);
    }

    // --- Freshness ---

    #[test]
    fn freshness_bands() {
        let now = now();
        let at = |days: i64| freshness_score(Some(now - Duration::days(days)), now);
        assert_eq!(at(0), 100.0);
        assert_eq!(at(1), 100.0);
        assert_eq!(at(2), 80.0);
        assert_eq!(at(7), 80.0);
        assert_eq!(at(30), 60.0);
        assert_eq!(at(90), 40.0);
        assert_eq!(at(365), 20.0);
        assert_eq!(at(-3), 100.0);
        assert_eq!(freshness_score(None, now), NEUTRAL_FRESHNESS);
    }

    // --- Authority ---

    #[test]
    fn authority_from_table_and_https_bonus() {
        let tables = ScoringTables::default();
        assert_eq!(authority_score(Some("https://github.com/rust-lang"), &tables), 90.0);
        assert_eq!(authority_score(Some("http://www.reddit.com/r/rust"), &tables), 60.0);
        assert_eq!(authority_score(Some("https://unknown.blog/post"), &tables), 60.0);
        assert_eq!(authority_score(Some("http://unknown.blog/post"), &tables), 50.0);
    }

    #[test]
    fn authority_tolerates_missing_and_malformed_urls() {
        let tables = ScoringTables::default();
        assert_eq!(authority_score(None, &tables), BASE_AUTHORITY);
        assert_eq!(authority_score(Some("not a url"), &tables), BASE_AUTHORITY);
        assert_eq!(authority_score(Some("://"), &tables), BASE_AUTHORITY);
    }

    // --- Final score ---

    #[test]
    fn final_score_with_defaults() {
        let tables = ScoringTables::default();
        let c = CandidateContent {
            quality: QualitySignals {
                score: 80.0,
                word_count: 500,
            },
            relevance_score: Some(50.0),
            ..Default::default()
        };
        // round(32 + 15 + 10 + 5)
        assert_eq!(final_score(&c, &tables, now()), 62);
    }

    #[test]
    fn final_score_combines_all_signals() {
        let tables = ScoringTables::default();
        let c = CandidateContent {
            url: Some("https://github.com/x".into()),
            quality: QualitySignals {
                score: 70.0,
                word_count: 500,
            },
            metadata: CandidateMetadata {
                publish_date: Some(now() - Duration::days(3)),
            },
            relevance_score: Some(40.0),
            ..Default::default()
        };
        // 28 + 12 + 16 + 9 = 65
        assert_eq!(final_score(&c, &tables, now()), 65);
    }

    #[test]
    fn final_score_stays_in_range() {
        let tables = ScoringTables::default();
        let extremes = [(-50.0, Some(-10.0)), (500.0, Some(900.0)), (0.0, None)];
        for (quality, relevance) in extremes {
            let c = CandidateContent {
                quality: QualitySignals {
                    score: quality,
                    word_count: 0,
                },
                relevance_score: relevance,
                url: Some("https://wikipedia.org".into()),
                ..Default::default()
            };
            let score = final_score(&c, &tables, now());
            assert!(score <= 100, "score {score} out of range");
        }
    }
}
