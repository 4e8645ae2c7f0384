use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::formatted::FormattedArticle;

/// Characters of body markup searched by the early-keyword check.
const LEAD_CHARS: usize = 500;
const META_DESCRIPTION_RANGE: std::ops::RangeInclusive<usize> = 150..=160;
const MIN_H2_HEADINGS: usize = 3;
const MIN_EXCERPT_CHARS: usize = 50;
const MIN_KEYWORDS: usize = 3;

/// One rubric item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoCheck {
    pub name: String,
    pub passed: bool,
    /// Points awarded when passed.
    pub points: u32,
}

/// Total score (0-100) plus the itemized checks, in rubric order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoReport {
    pub score: u32,
    pub checks: Vec<SeoCheck>,
}

impl SeoReport {
    pub fn passed(&self) -> impl Iterator<Item = &SeoCheck> {
        self.checks.iter().filter(|c| c.passed)
    }
}

/// Scores a formatted article against the fixed SEO rubric.
///
/// Keyword checks are case-insensitive substring tests that pass when any
/// keyword matches; with no keywords they all fail.
///
/// ```rust
/// use newsroom_core::{FormattedArticle, score_article};
///
/// let article = FormattedArticle {
///     slug: "ghana-news".to_string(),
///     keywords: vec!["ghana".to_string()],
///     ..Default::default()
/// };
/// let report = score_article(&article);
/// assert!(report.checks[0].passed);
/// assert_eq!(report.score, 15);
/// ```
pub fn score_article(article: &FormattedArticle) -> SeoReport {
    let keywords: Vec<String> = article.keywords.iter().map(|k| k.to_lowercase()).collect();
    let any_keyword_in = |haystack: &str| {
        let haystack = haystack.to_lowercase();
        keywords.iter().any(|k| haystack.contains(k.as_str()))
    };

    let slug = article.slug.to_lowercase();
    let lead: String = article.content.chars().take(LEAD_CHARS).collect();

    let checks = vec![
        check("Keyword in URL", 15, keywords.iter().any(|k| slug.contains(&hyphenate(k)))),
        check("Keyword in Title Tag", 15, any_keyword_in(&article.meta_title)),
        check("Keyword in H1", 15, any_keyword_in(&article.title)),
        check("Keyword in First 100 Words", 10, any_keyword_in(&lead)),
        check(
            "Meta Description Length (150-160)",
            10,
            META_DESCRIPTION_RANGE.contains(&article.meta_description.chars().count()),
        ),
        check("Has H2 Headings", 10, count_h2(&article.content) >= MIN_H2_HEADINGS),
        check("Has Schema Markup", 10, has_schema(&article.schema_markup)),
        check("Has Excerpt", 5, article.excerpt.chars().count() > MIN_EXCERPT_CHARS),
        check("Has Keywords", 5, article.keywords.len() >= MIN_KEYWORDS),
        check("Has Image Suggestion", 5, !article.featured_image_suggestion.is_empty()),
    ];

    let score = checks.iter().filter(|c| c.passed).map(|c| c.points).sum();
    SeoReport { score, checks }
}

fn check(name: &str, points: u32, passed: bool) -> SeoCheck {
    SeoCheck { name: name.to_string(), passed, points }
}

/// Keywords are compared against slugs with whitespace runs as hyphens.
fn hyphenate(keyword: &str) -> String {
    keyword.split_whitespace().collect::<Vec<_>>().join("-")
}

fn count_h2(html: &str) -> usize {
    html.to_ascii_lowercase().matches("<h2").count()
}

fn has_schema(schema: &Value) -> bool {
    match schema {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}
