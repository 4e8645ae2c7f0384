//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

const ORIGINAL_URL: &str = "https://ghanainsider.com/de/index.php/beispiel-artikel/";

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("newsroom")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_extract_file_json() {
    let output = cmd()
        .args(["extract", &get_fixture_path("snapshot_article.html"), "--original-url", ORIGINAL_URL])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["title"], "Beispiel Titel");
    assert_eq!(json["slug"], "index.php/beispiel-artikel");
    assert_eq!(json["category_slug"], "breaking-news");
    assert!(json["published_at"].is_null());
}

#[test]
fn test_cli_extract_stdin() {
    let html = std::fs::read_to_string(get_fixture_path("snapshot_article.html")).unwrap();
    cmd()
        .args(["extract", "-", "--original-url", ORIGINAL_URL, "-f", "html"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Karriere und Familie"))
        .stdout(predicate::str::contains("web.archive.org").not());
}

#[test]
fn test_cli_extract_text_format() {
    cmd()
        .args(["extract", &get_fixture_path("snapshot_article.html"), "--original-url", ORIGINAL_URL])
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Der bekannte Musiker"))
        .stdout(predicate::str::contains("<p>").not());
}

#[test]
fn test_cli_extract_requires_original_url_for_files() {
    cmd()
        .args(["extract", &get_fixture_path("snapshot_article.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--original-url"));
}

#[test]
fn test_cli_extract_no_content() {
    cmd()
        .args(["extract", &get_fixture_path("no_content.html"), "--original-url", ORIGINAL_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No article content found"));
}

#[test]
fn test_cli_extract_rejects_non_snapshot_url() {
    cmd()
        .args(["extract", ORIGINAL_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid archive.org URL format"));
}

#[test]
fn test_cli_extract_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("article.json");

    cmd()
        .args(["extract", &get_fixture_path("snapshot_article.html"), "--original-url", ORIGINAL_URL])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    assert!(std::fs::read_to_string(output).unwrap().contains("\"slug\""));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["extract", "-", "--original-url", ORIGINAL_URL, "-f", "markdown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_score_report() {
    cmd()
        .args(["score", &get_fixture_path("formatted_article.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keyword in URL"))
        .stdout(predicate::str::contains("100/100"));
}

#[test]
fn test_cli_score_json() {
    let output = cmd()
        .args(["score", "--json", &get_fixture_path("formatted_article.json")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["score"], 100);
    assert_eq!(json["checks"].as_array().unwrap().len(), 10);
}

#[test]
fn test_cli_score_partial_from_stdin() {
    cmd()
        .args(["score", "--json", "-"])
        .write_stdin(r#"{"slug":"ghana-news","keywords":["ghana"]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": 15"));
}

#[test]
fn test_cli_score_rejects_garbage() {
    cmd().args(["score", "-"]).write_stdin("not json").assert().failure();
}

#[test]
fn test_cli_bulk_without_valid_urls() {
    cmd()
        .args(["bulk", "-"])
        .write_stdin("https://ghanainsider.com/de/a/\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid archive URLs"));
}

#[test]
fn test_cli_bulk_unreachable_server_writes_report() {
    let tmp = TempDir::new().unwrap();
    let report = tmp.path().join("report.csv");
    let urls = "https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/a/\n\
                ignored line\n\
                https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/b/\n";

    cmd()
        .args(["bulk", "-", "--server", "http://127.0.0.1:9", "--timeout", "5"])
        .args(["-o", report.to_str().unwrap()])
        .env_remove("NEWSROOM_TOKEN")
        .write_stdin(urls)
        .assert()
        .success()
        .stderr(predicate::str::contains("[2/2]"));

    let csv = std::fs::read_to_string(report).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "URL,Status,Message,Post Title,Post Slug");
    assert!(lines[1].starts_with("\"https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/a/\",\"failed\""));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("newsroom"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("newsroom"));
}
