use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Slug used when nothing usable can be derived from a URL.
pub const FALLBACK_SLUG: &str = "imported-post";

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Derives an article slug from its original URL.
///
/// Everything after the `/<locale>/` prefix is kept, including legacy path
/// segments such as `index.php/`, with the query and fragment removed, one
/// trailing slash stripped and the result lowercased. Without a locale prefix
/// the last non-empty path segment is used.
///
/// ```rust
/// use newsroom_core::slug::slug_from_url;
///
/// assert_eq!(slug_from_url("https://ghanainsider.com/de/index.php/mein-artikel/", "de"), "index.php/mein-artikel");
/// assert_eq!(slug_from_url("https://ghanainsider.com/", "de"), "imported-post");
/// ```
pub fn slug_from_url(url: &str, locale: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let bare = without_fragment.split('?').next().unwrap_or_default();
    let marker = format!("/{locale}/");

    if let Some(index) = bare.find(&marker) {
        let after = &bare[index + marker.len()..];
        let after = after.strip_suffix('/').unwrap_or(after).trim();
        if !after.is_empty() {
            return after.to_lowercase();
        }
    }

    last_segment(bare).map(|s| s.to_lowercase()).unwrap_or_else(|| FALLBACK_SLUG.to_string())
}

fn last_segment(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => parsed.path_segments()?.rfind(|s| !s.is_empty()).map(str::to_string),
        Err(_) => url.split('/').rfind(|s| !s.is_empty()).map(str::to_string),
    }
}

/// Normalizes a free-form slug: lowercase ASCII, German umlauts transliterated,
/// every other run of characters collapsed to a single hyphen.
pub fn sanitize_slug(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    for c in slug.chars() {
        match c {
            'ä' | 'Ä' => out.push_str("ae"),
            'ö' | 'Ö' => out.push_str("oe"),
            'ü' | 'Ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            _ => out.extend(c.to_lowercase()),
        }
    }
    NON_ALNUM.replace_all(&out, "-").trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://ghanainsider.com/de/index.php/mein-artikel/", "index.php/mein-artikel")]
    #[case("https://ghanainsider.com/de/Gross-Geschrieben", "gross-geschrieben")]
    #[case("https://ghanainsider.com/de/index.php/a/?utm_source=x", "index.php/a")]
    #[case("https://ghanainsider.com/de/index.php/b/#kommentare", "index.php/b")]
    #[case("https://ghanainsider.com/en/some-post/", "some-post")]
    #[case("https://ghanainsider.com/de/", "de")]
    #[case("https://ghanainsider.com/", FALLBACK_SLUG)]
    #[case("", FALLBACK_SLUG)]
    fn test_slug_from_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(slug_from_url(url, "de"), expected);
    }

    #[rstest]
    #[case("Größte Überraschung für Jäger", "groesste-ueberraschung-fuer-jaeger")]
    #[case("  --Hallo,   Welt!--  ", "hallo-welt")]
    #[case("already-clean-2025", "already-clean-2025")]
    #[case("", "")]
    fn test_sanitize_slug(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_slug(input), expected);
    }
}
