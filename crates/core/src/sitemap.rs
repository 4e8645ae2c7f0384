//! XML sitemap for the public site.

use std::fmt::Write;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::article::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeFreq {
    Daily,
    Weekly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

struct Entry {
    loc: String,
    lastmod: OffsetDateTime,
    changefreq: ChangeFreq,
    priority: &'static str,
}

/// Renders the sitemap: the home and locale pages, then one entry per article.
///
/// Only pass published articles. Static pages are stamped with `now`,
/// articles with their `updated_at`.
pub fn render_sitemap(origin: &str, locale: &str, articles: &[Article], now: OffsetDateTime) -> String {
    let origin = origin.trim_end_matches('/');

    let mut entries = vec![
        Entry { loc: origin.to_string(), lastmod: now, changefreq: ChangeFreq::Daily, priority: "1.0" },
        Entry { loc: format!("{origin}/{locale}"), lastmod: now, changefreq: ChangeFreq::Daily, priority: "1.0" },
    ];
    entries.extend(articles.iter().map(|article| Entry {
        loc: format!("{origin}/{locale}/{}", article.slug),
        lastmod: article.updated_at,
        changefreq: ChangeFreq::Weekly,
        priority: "0.8",
    }));

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        let lastmod = entry.lastmod.format(&Rfc3339).unwrap_or_default();
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape_xml(&entry.loc),
            entry.changefreq.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleStatus, NewArticle};
    use time::macros::datetime;

    fn article(slug: &str) -> Article {
        Article::from_new(
            NewArticle {
                title: "T".into(),
                slug: slug.into(),
                content: "<p>x</p>".into(),
                status: ArticleStatus::Published,
                ..Default::default()
            },
            datetime!(2024-03-01 12:00 UTC),
        )
    }

    #[test]
    fn test_static_pages_first() {
        let xml = render_sitemap("https://ghanainsider.com/", "de", &[], datetime!(2025-01-01 0:00 UTC));
        assert!(xml.contains("<loc>https://ghanainsider.com</loc>"));
        assert!(xml.contains("<loc>https://ghanainsider.com/de</loc>"));
        assert_eq!(xml.matches("<changefreq>daily</changefreq>").count(), 2);
        assert_eq!(xml.matches("<priority>1.0</priority>").count(), 2);
    }

    #[test]
    fn test_article_entries() {
        let xml = render_sitemap(
            "https://ghanainsider.com",
            "de",
            &[article("index.php/a&b")],
            datetime!(2025-01-01 0:00 UTC),
        );
        assert!(xml.contains("<loc>https://ghanainsider.com/de/index.php/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2024-03-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
