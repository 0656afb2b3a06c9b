//! Static lookup tables consulted by the scoring and enrichment passes.
//!
//! Every table has a built-in default and can be replaced wholesale from the
//! `[tables]` section of `trendpress.toml`. Entries are lowercased on load so
//! lookups only ever compare lowercase text.

use std::collections::BTreeMap;

use trendpress_shared::{CategoryEntry, TablesConfig};

const DEFAULT_BLACKLIST: &[&str] = &[
    "casino",
    "gambling",
    "sponsored",
    "advertisement",
    "porn",
    "도박",
    "광고",
    "성인",
];

const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("ai", &["artificial intelligence", "machine learning", "llm", "인공지능"]),
    ("인공지능", &["ai", "머신러닝", "딥러닝", "챗gpt"]),
    ("rust", &["cargo", "crate", "borrow checker", "러스트"]),
    ("javascript", &["js", "node.js", "typescript", "npm"]),
    ("react", &["jsx", "hooks", "next.js", "component"]),
    ("python", &["pip", "django", "pandas", "파이썬"]),
    ("blockchain", &["crypto", "bitcoin", "ethereum", "web3"]),
    ("cloud", &["aws", "azure", "gcp", "kubernetes"]),
    ("주식", &["증시", "코스피", "투자", "배당"]),
];

const DEFAULT_DOMAIN_AUTHORITY: &[(&str, f64)] = &[
    ("wikipedia.org", 95.0),
    ("developer.mozilla.org", 95.0),
    ("github.com", 90.0),
    ("stackoverflow.com", 90.0),
    ("reuters.com", 90.0),
    ("bbc.com", 90.0),
    ("techcrunch.com", 85.0),
    ("theverge.com", 80.0),
    ("wired.com", 80.0),
    ("naver.com", 75.0),
    ("medium.com", 70.0),
    ("dev.to", 70.0),
    ("velog.io", 70.0),
    ("tistory.com", 60.0),
    ("reddit.com", 60.0),
];

const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "technology", "software", "programming", "developer", "ai", "rust",
            "javascript", "python", "cloud", "기술", "개발", "프로그래밍", "인공지능",
        ],
    ),
    (
        "business",
        &[
            "business", "market", "startup", "investment", "finance", "economy",
            "stock", "경제", "투자", "주식", "창업",
        ],
    ),
    (
        "lifestyle",
        &["travel", "food", "fashion", "recipe", "home", "여행", "음식", "패션", "요리"],
    ),
    (
        "health",
        &["health", "fitness", "diet", "medical", "exercise", "sleep", "건강", "운동", "다이어트"],
    ),
    (
        "entertainment",
        &["movie", "music", "game", "drama", "celebrity", "영화", "음악", "게임", "드라마"],
    ),
    (
        "science",
        &["science", "research", "space", "physics", "biology", "climate", "과학", "연구", "우주"],
    ),
];

const DEFAULT_TAGS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "next.js",
    "node.js",
    "python",
    "rust",
    "ai",
    "machine learning",
    "blockchain",
    "cloud",
    "docker",
    "kubernetes",
    "security",
    "startup",
    "인공지능",
    "개발",
    "프로그래밍",
    "러스트",
];

const DEFAULT_POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "best", "love", "improve", "improving",
    "success", "growth", "growing", "healthy", "faster", "좋", "훌륭", "최고", "성공", "성장",
    "추천",
];

const DEFAULT_NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "terrible", "worst", "hate", "fail", "failure", "problem", "risk",
    "decline", "crash", "slow", "나쁘", "최악", "실패", "문제", "위험", "하락",
];

/// Lookup tables owned by a [`crate::Processor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTables {
    /// Terms that disqualify a candidate or keyword outright.
    pub blacklist: Vec<String>,
    /// Keyword → related keywords worth a relevance bonus.
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Hostname → authority score in [0, 100].
    pub domain_authority: BTreeMap<String, f64>,
    /// Ordered category rules; earlier entries win ties.
    pub categories: Vec<CategoryEntry>,
    /// Known terms promoted to tags, in priority order.
    pub tags: Vec<String>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            blacklist: owned(DEFAULT_BLACKLIST),
            synonyms: DEFAULT_SYNONYMS
                .iter()
                .map(|(k, v)| (k.to_string(), owned(v)))
                .collect(),
            domain_authority: DEFAULT_DOMAIN_AUTHORITY
                .iter()
                .map(|(d, s)| (d.to_string(), *s))
                .collect(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, keywords)| CategoryEntry {
                    name: name.to_string(),
                    keywords: owned(keywords),
                })
                .collect(),
            tags: owned(DEFAULT_TAGS),
            positive_words: owned(DEFAULT_POSITIVE_WORDS),
            negative_words: owned(DEFAULT_NEGATIVE_WORDS),
        }
    }
}

impl ScoringTables {
    /// Built-in tables with any table present in `overrides` swapped in.
    pub fn with_overrides(overrides: &TablesConfig) -> Self {
        let mut tables = Self::default();

        if let Some(blacklist) = &overrides.blacklist {
            tables.blacklist = lowercase_all(blacklist);
        }
        if let Some(synonyms) = &overrides.synonyms {
            tables.synonyms = synonyms
                .iter()
                .map(|(k, v)| (k.trim().to_lowercase(), lowercase_all(v)))
                .collect();
        }
        if let Some(domains) = &overrides.domain_authority {
            tables.domain_authority = domains
                .iter()
                .map(|(d, s)| (d.trim().to_lowercase(), s.clamp(0.0, 100.0)))
                .collect();
        }
        if let Some(categories) = &overrides.categories {
            tables.categories = categories
                .iter()
                .map(|c| CategoryEntry {
                    name: c.name.trim().to_string(),
                    keywords: lowercase_all(&c.keywords),
                })
                .collect();
        }
        if let Some(tags) = &overrides.tags {
            tables.tags = lowercase_all(tags);
        }
        if let Some(words) = &overrides.positive_words {
            tables.positive_words = lowercase_all(words);
        }
        if let Some(words) = &overrides.negative_words {
            tables.negative_words = lowercase_all(words);
        }

        tables
    }

    /// Authority of the most specific table entry matching `host`
    /// (exact match or subdomain), if any.
    pub fn authority_for_host(&self, host: &str) -> Option<f64> {
        self.domain_authority
            .iter()
            .filter(|(domain, _)| {
                host == domain.as_str()
                    || host
                        .strip_suffix(domain.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            })
            .max_by_key(|(domain, _)| domain.len())
            .map(|(_, score)| *score)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
