//! Snapshot URL validation and archive-URL unwrapping.
//!
//! A snapshot URL has the shape `<archive-host>/web/<digits>/<original URL>`,
//! with or without a scheme. Inside archived markup the archive rewrites
//! every link and asset to point back at itself, sometimes with a two-letter
//! modifier such as `im_` (images) or `js_` after the timestamp. [`ArchiveHost`]
//! recognises both forms for one configurable host.
//!
//! # Example
//!
//! ```rust
//! use newsroom_core::archive::ArchiveHost;
//!
//! let host = ArchiveHost::default();
//! let original = host
//!     .original_url("https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/a/")
//!     .unwrap();
//! assert_eq!(original, "https://ghanainsider.com/de/a/");
//! ```

use regex::Regex;
use url::Url;

use crate::{NewsroomError, Result};

pub const DEFAULT_ARCHIVE_HOST: &str = "web.archive.org";

/// Compiled patterns for one archive host.
#[derive(Debug, Clone)]
pub struct ArchiveHost {
    host: String,
    snapshot: Regex,
    prefix: Regex,
    relative: Regex,
}

impl ArchiveHost {
    pub fn new(host: &str) -> Result<Self> {
        let escaped = regex::escape(host);
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| NewsroomError::ConfigError(format!("archive host {host}: {e}")))
        };

        Ok(Self {
            host: host.to_string(),
            snapshot: compile(format!(r"^(?:https?://)?{escaped}/web/\d+/(https?://.+)$"))?,
            prefix: compile(format!(r"(?:https?:)?(?://)?{escaped}/web/\d+(?:[a-z]{{2}}_)?/"))?,
            relative: compile(r#"(^|["'\s])/web/\d+(?:[a-z]{2}_)?/(https?://)"#.to_string())?,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Validates a snapshot URL and returns the original URL it captures.
    ///
    /// The result is exactly the substring after the timestamp segment.
    pub fn original_url<'a>(&self, snapshot: &'a str) -> Result<&'a str> {
        self.snapshot
            .captures(snapshot.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or(NewsroomError::InvalidFormat)
    }

    /// Removes archive wrapping from every URL in a chunk of markup.
    ///
    /// Wrapped absolute URLs become the bare URL; a prefix followed by a
    /// relative path is deleted. Applied until nothing matches, so the result
    /// is a fixed point.
    pub fn unwrap_urls(&self, html: &str) -> String {
        let mut current = html.to_string();
        loop {
            let next = self.prefix.replace_all(&current, "");
            let next = self.relative.replace_all(&next, "$1$2").into_owned();
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Unwraps a single asset URL and makes it absolute against `origin`.
    pub fn clean_asset_url(&self, url: &str, origin: &Url) -> String {
        let unwrapped = self.unwrap_urls(url.trim());
        if unwrapped.starts_with("http://") || unwrapped.starts_with("https://") {
            return unwrapped;
        }

        match origin.join(&unwrapped) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => format!("{}/{}", origin.as_str().trim_end_matches('/'), unwrapped.trim_start_matches('/')),
        }
    }
}

impl Default for ArchiveHost {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_HOST).unwrap_or_else(|_| unreachable!("escaped default host always compiles"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn origin() -> Url {
        Url::parse("https://ghanainsider.com").unwrap()
    }

    #[rstest]
    #[case(
        "https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/index.php/beispiel-artikel/",
        "https://ghanainsider.com/de/index.php/beispiel-artikel/"
    )]
    #[case("web.archive.org/web/1/http://example.com/a?b=c#d", "http://example.com/a?b=c#d")]
    #[case("http://web.archive.org/web/20200101/https://ghanainsider.com/de/", "https://ghanainsider.com/de/")]
    fn test_original_url(#[case] snapshot: &str, #[case] expected: &str) {
        assert_eq!(ArchiveHost::default().original_url(snapshot).unwrap(), expected);
    }

    #[rstest]
    #[case("https://ghanainsider.com/de/a/")]
    #[case("https://web.archive.org/web/abc/https://ghanainsider.com/de/a/")]
    #[case("https://web.archive.org/web/20230101000000/ghanainsider.com/de/a/")]
    #[case("https://archive.ph/web/20230101000000/https://ghanainsider.com/de/a/")]
    #[case("")]
    fn test_invalid_snapshot(#[case] snapshot: &str) {
        assert!(matches!(ArchiveHost::default().original_url(snapshot), Err(NewsroomError::InvalidFormat)));
    }

    #[test]
    fn test_custom_host() {
        let host = ArchiveHost::new("archive.example.org").unwrap();
        assert_eq!(
            host.original_url("https://archive.example.org/web/42/https://x.test/").unwrap(),
            "https://x.test/"
        );
        assert!(host.original_url("https://web.archive.org/web/42/https://x.test/").is_err());
    }

    #[test]
    fn test_unwrap_urls() {
        let host = ArchiveHost::default();
        let html = concat!(
            r#"<a href="https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/b/">b</a>"#,
            r#"<img src="https://web.archive.org/web/20230101000000im_/https://ghanainsider.com/x.jpg">"#,
            r#"<a href="//web.archive.org/web/20230101000000/wp-content/y.pdf">y</a>"#,
            r#"<a href="/web/20230101000000/https://other.test/">o</a>"#,
        );

        let unwrapped = host.unwrap_urls(html);
        assert!(!unwrapped.contains("web.archive.org"));
        assert!(unwrapped.contains(r#"href="https://ghanainsider.com/de/b/""#));
        assert!(unwrapped.contains(r#"src="https://ghanainsider.com/x.jpg""#));
        assert!(unwrapped.contains(r#"href="wp-content/y.pdf""#));
        assert!(unwrapped.contains(r#"href="https://other.test/""#));
    }

    #[test]
    fn test_unwrap_is_idempotent() {
        let host = ArchiveHost::default();
        let html = "https://web.archive.org/web/1/https://web.archive.org/web/2/https://ghanainsider.com/de/a/";
        let once = host.unwrap_urls(html);
        assert_eq!(once, "https://ghanainsider.com/de/a/");
        assert_eq!(host.unwrap_urls(&once), once);
    }

    #[rstest]
    #[case("https://web.archive.org/web/20230101000000im_/https://ghanainsider.com/a.jpg", "https://ghanainsider.com/a.jpg")]
    #[case("/web/20230101000000im_/https://ghanainsider.com/b.jpg", "https://ghanainsider.com/b.jpg")]
    #[case("/wp-content/uploads/c.jpg", "https://ghanainsider.com/wp-content/uploads/c.jpg")]
    #[case("wp-content/uploads/d.jpg", "https://ghanainsider.com/wp-content/uploads/d.jpg")]
    #[case("https://cdn.test/e.jpg", "https://cdn.test/e.jpg")]
    fn test_clean_asset_url(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ArchiveHost::default().clean_asset_url(input, &origin()), expected);
    }
}
