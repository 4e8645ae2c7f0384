//! Destructive cleanup of extracted article markup.
//!
//! Runs over the serialized content container in three passes: ad and widget
//! removal with a streaming rewriter, archive-URL unwrapping, then whitespace
//! normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::archive::ArchiveHost;
use crate::{NewsroomError, Result};

static EMPTY_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<p>\s*</p>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Elements dropped from article bodies.
pub const DEFAULT_REMOVE_SELECTORS: &[&str] =
    &[r#"[class*="quads-"]"#, "#ez-toc-container", "script", "ins.adsbygoogle", "iframe"];

#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// CSS selectors of elements removed together with their content.
    pub remove_selectors: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self { remove_selectors: DEFAULT_REMOVE_SELECTORS.iter().map(|s| s.to_string()).collect() }
    }
}

/// Cleans an article body: removal, unwrapping, normalization.
pub fn clean_content(html: &str, config: &CleanConfig, archive: &ArchiveHost) -> Result<String> {
    let stripped = remove_elements(html, &config.remove_selectors)?;
    let unwrapped = archive.unwrap_urls(&stripped);
    Ok(normalize_whitespace(&unwrapped))
}

/// Removes every element matching one of `selectors`, content included.
pub fn remove_elements(html: &str, selectors: &[String]) -> Result<String> {
    for selector in selectors {
        selector
            .parse::<lol_html::Selector>()
            .map_err(|e| NewsroomError::HtmlParseError(format!("Invalid selector {selector}: {e}")))?;
    }

    let mut output = String::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: selectors
                .iter()
                .map(|selector| {
                    lol_html::element!(selector.as_str(), |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    rewriter.write(html.as_bytes()).map_err(|e| NewsroomError::HtmlParseError(e.to_string()))?;
    rewriter.end().map_err(|e| NewsroomError::HtmlParseError(e.to_string()))?;

    Ok(output)
}

/// Drops empty paragraphs and collapses whitespace runs to one space.
pub fn normalize_whitespace(html: &str) -> String {
    let without_empty = EMPTY_PARAGRAPH.replace_all(html, "");
    WHITESPACE.replace_all(&without_empty, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_ads_and_widgets() {
        let html = r#"
            <p>Erster Absatz.</p>
            <div class="quads-location quads-ad1"><ins class="adsbygoogle">ad</ins></div>
            <div id="ez-toc-container"><ul><li>Inhalt</li></ul></div>
            <script>track();</script>
            <iframe src="https://www.youtube.com/embed/x"></iframe>
            <ins class="adsbygoogle" data-ad-slot="1"></ins>
            <p>Zweiter Absatz.</p>
        "#;

        let result = remove_elements(html, &CleanConfig::default().remove_selectors).unwrap();
        assert!(!result.contains("quads"));
        assert!(!result.contains("ez-toc"));
        assert!(!result.contains("track()"));
        assert!(!result.contains("youtube"));
        assert!(!result.contains("adsbygoogle"));
        assert!(result.contains("<p>Erster Absatz.</p>"));
        assert!(result.contains("<p>Zweiter Absatz.</p>"));
    }

    #[test]
    fn test_invalid_selector() {
        let result = remove_elements("<p>x</p>", &["[[broken".to_string()]);
        assert!(matches!(result, Err(NewsroomError::HtmlParseError(_))));
    }

    #[test]
    fn test_normalize_whitespace() {
        let html = "  <p>Text\n\n   mit   Lücken</p>\n<p>  </p><p></p>\t<h2>Titel</h2>  ";
        assert_eq!(normalize_whitespace(html), "<p>Text mit Lücken</p> <h2>Titel</h2>");
    }

    #[test]
    fn test_clean_content_unwraps_archive_links() {
        let html = r#"<p>Siehe <a href="https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/x/">hier</a>.</p><script>x()</script>"#;
        let cleaned = clean_content(html, &CleanConfig::default(), &ArchiveHost::default()).unwrap();
        assert_eq!(cleaned, r#"<p>Siehe <a href="https://ghanainsider.com/de/x/">hier</a>.</p>"#);
    }
}
