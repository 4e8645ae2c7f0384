//! HTML parsing and DOM queries.
//!
//! [`Document`] and [`Element`] wrap `scraper` so callers work with CSS
//! selector strings and get [`NewsroomError::HtmlParseError`] for bad ones.
//!
//! # Example
//!
//! ```rust
//! use newsroom_core::parse::Document;
//!
//! let doc = Document::parse(r#"<article><div class="entry-content"><p>Hallo</p></div></article>"#);
//! let body = doc.select_first("article .entry-content").unwrap().unwrap();
//! assert_eq!(body.inner_html(), "<p>Hallo</p>");
//! ```

use scraper::{Html, Selector};

use crate::{NewsroomError, Result};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| NewsroomError::HtmlParseError(format!("Invalid selector: {}", e)))
}

impl Document {
    /// Parses a full document. Parsing is lenient and never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses a fragment such as a cleaned article body.
    pub fn parse_fragment(html: &str) -> Self {
        Self { html: Html::parse_fragment(html) }
    }

    /// Selects every element matching a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`NewsroomError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, css: &str) -> Result<Vec<Element<'_>>> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// First element in document order matching `css`.
    pub fn select_first(&'_ self, css: &str) -> Result<Option<Element<'_>>> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Tries each selector in turn and returns the first match of the
    /// earliest selector that matches anything.
    ///
    /// Unlike a comma-joined selector list this honours candidate priority
    /// rather than document order.
    pub fn first_of(&'_ self, candidates: &[String]) -> Result<Option<Element<'_>>> {
        for css in candidates {
            if let Some(el) = self.select_first(css)? {
                return Ok(Some(el));
            }
        }
        Ok(None)
    }

    /// Content of `<meta property=...>` or `<meta name=...>`.
    pub fn meta_content(&self, property: &str) -> Option<String> {
        let css = format!(r#"meta[property="{property}"], meta[name="{property}"]"#);
        self.select_first(&css)
            .ok()
            .flatten()
            .and_then(|el| el.attr("content").map(str::trim).filter(|c| !c.is_empty()).map(str::to_string))
    }

    /// Concatenated text of the whole document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// A single element of a [`Document`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    pub fn select_first(&'_ self, css: &str) -> Result<Option<Element<'_>>> {
        let sel = selector(css)?;
        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="de">
        <head>
            <meta property="og:image" content=" https://ghanainsider.com/og.jpg ">
            <meta name="description" content="">
            <title>Testseite</title>
        </head>
        <body>
            <h1>Seitenkopf</h1>
            <article>
                <h1 class="entry-title">Artikeltitel</h1>
                <div class="entry-content"><p>Absatz 1</p><p>Absatz 2</p></div>
            </article>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let paragraphs = doc.select("article .entry-content p").unwrap();

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text(), "Absatz 1");
        assert_eq!(paragraphs[1].tag_name(), "p");
    }

    #[test]
    fn test_first_of_respects_priority() {
        let doc = Document::parse(SAMPLE_HTML);
        let candidates = vec!["h1.entry-title".to_string(), "h1".to_string()];
        let title = doc.first_of(&candidates).unwrap().unwrap();
        assert_eq!(title.text(), "Artikeltitel");

        let joined = doc.select_first("h1.entry-title, h1").unwrap().unwrap();
        assert_eq!(joined.text(), "Seitenkopf");
    }

    #[test]
    fn test_meta_content() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.meta_content("og:image").as_deref(), Some("https://ghanainsider.com/og.jpg"));
        assert_eq!(doc.meta_content("description"), None);
        assert_eq!(doc.meta_content("og:title"), None);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        assert!(matches!(doc.select("[[invalid"), Err(NewsroomError::HtmlParseError(_))));
    }

    #[test]
    fn test_fragment_text() {
        let doc = Document::parse_fragment("<p>Eins.</p> <p>Zwei!</p>");
        assert_eq!(doc.text_content(), "Eins. Zwei!");
    }
}
