use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use newsroom_core::{ArchiveHost, CleanConfig, Document, ExtractConfig, FormattedArticle, clean_content, extract_article, score_article};

const ORIGINAL_URL: &str = "https://ghanainsider.com/de/index.php/beispiel-artikel/";

fn snapshot() -> String {
    std::fs::read_to_string("../../tests/fixtures/snapshot_article.html").unwrap()
}

/// Repeats the article body to get a page of realistic size.
fn padded_snapshot(copies: usize) -> String {
    let html = snapshot();
    let start = html.find("<div class=\"entry-content\">").unwrap();
    let end = html[start..].find("</article>").unwrap() + start;
    let body = &html[start + "<div class=\"entry-content\">".len()..end];
    html.replacen(body, &body.repeat(copies), 1)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for copies in [1, 20, 200] {
        let html = padded_snapshot(copies);
        group.bench_with_input(BenchmarkId::new("snapshot", copies), &html, |b, html| {
            b.iter(|| Document::parse(black_box(html)))
        });
    }

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = snapshot();
    let config = ExtractConfig::default();

    c.bench_function("full_extraction", |b| {
        b.iter(|| extract_article(black_box(&html), ORIGINAL_URL, &config))
    });
}

fn bench_cleaning(c: &mut Criterion) {
    let html = padded_snapshot(20);
    let config = CleanConfig::default();
    let archive = ArchiveHost::default();

    c.bench_function("clean_and_unwrap", |b| b.iter(|| clean_content(black_box(&html), &config, &archive)));
}

fn bench_scoring(c: &mut Criterion) {
    let json = std::fs::read_to_string("../../tests/fixtures/formatted_article.json").unwrap();
    let article: FormattedArticle = serde_json::from_str(&json).unwrap();

    c.bench_function("seo_scoring", |b| b.iter(|| score_article(black_box(&article))));
}

criterion_group!(benches, bench_parse, bench_full_extraction, bench_cleaning, bench_scoring);
criterion_main!(benches);
