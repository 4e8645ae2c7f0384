//! CSV report for bulk imports.

use std::io::{self, Write};

use newsroom_core::ImportOutcome;

const HEADER: &str = "URL,Status,Message,Post Title,Post Slug";

/// Writes one row per outcome under a fixed header.
pub fn write_csv<W: Write>(mut out: W, outcomes: &[ImportOutcome]) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for outcome in outcomes {
        let row = [
            outcome.url.as_str(),
            outcome.status.as_str(),
            outcome.message.as_str(),
            outcome.post_title.as_deref().unwrap_or_default(),
            outcome.post_slug.as_deref().unwrap_or_default(),
        ];
        let fields: Vec<String> = row.iter().map(|field| quote(field)).collect();
        writeln!(out, "{}", fields.join(","))?;
    }
    out.flush()
}

/// Every field is quoted; embedded quotes are doubled.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::OutcomeStatus;

    #[test]
    fn test_write_csv() {
        let outcomes = vec![
            ImportOutcome {
                url: "https://web.archive.org/web/1/https://ghanainsider.com/de/a/".into(),
                status: OutcomeStatus::Skipped,
                message: "A post with the slug \"a\" already exists".into(),
                post_title: Some("Titel, mit Komma".into()),
                post_slug: Some("a".into()),
            },
            ImportOutcome::failed("x", "boom"),
        ];

        let mut buf = Vec::new();
        write_csv(&mut buf, &outcomes).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "URL,Status,Message,Post Title,Post Slug");
        assert_eq!(
            lines[1],
            r#""https://web.archive.org/web/1/https://ghanainsider.com/de/a/","skipped","A post with the slug ""a"" already exists","Titel, mit Komma","a""#
        );
        assert_eq!(lines[2], r#""x","failed","boom","","""#);
    }
}
