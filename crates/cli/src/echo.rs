use newsroom_core::{ImportOutcome, OutcomeStatus, ScrapedArticle, SeoReport};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Newsroom".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Archive recovery and SEO tooling\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print what extraction found, minus the body
pub fn print_extraction_details(article: &ScrapedArticle) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Extraction Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Title:".dimmed(), article.title.bright_white());
    eprintln!("  {} {}", "Slug:".dimmed(), article.slug.bright_white());
    eprintln!("  {} {}", "Category:".dimmed(), article.category_slug.bright_white());
    if let Some(image) = &article.featured_image {
        eprintln!("  {} {}", "Image:".dimmed(), image.bright_white());
    }
    eprintln!("  {} {}\n", "Keywords:".dimmed(), article.keywords.join(", ").bright_white());
}

/// One line per rubric item, then the total in a traffic-light color
pub fn print_seo_report(report: &SeoReport) {
    for check in &report.checks {
        if check.passed {
            println!("  {} {} {}", "✓".green(), check.name, format!("+{}", check.points).dimmed());
        } else {
            println!("  {} {} {}", "✗".red(), check.name.dimmed(), format!("({})", check.points).dimmed());
        }
    }

    let total = format!("{}/100", report.score);
    match report.score {
        80.. => println!("\n  {} {}", "SEO score:".bold(), total.bright_green()),
        50..80 => println!("\n  {} {}", "SEO score:".bold(), total.bright_yellow()),
        _ => println!("\n  {} {}", "SEO score:".bold(), total.bright_red()),
    }
}

pub fn print_outcome(index: usize, total: usize, outcome: &ImportOutcome) {
    let counter = format!("[{}/{}]", index, total);
    match outcome.status {
        OutcomeStatus::Imported => eprintln!("{} {} {}", counter.dimmed(), "✓".green(), outcome.message.bright_green()),
        OutcomeStatus::Skipped => eprintln!("{} {} {}", counter.dimmed(), "⚠".yellow(), outcome.message.bright_yellow()),
        OutcomeStatus::Failed => eprintln!("{} {} {}", counter.dimmed(), "✗".red(), outcome.message.bright_red()),
    }
    eprintln!("      {}", outcome.url.dimmed());
}

pub fn print_bulk_summary(outcomes: &[ImportOutcome]) {
    let count = |status: OutcomeStatus| outcomes.iter().filter(|o| o.status == status).count();

    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Bulk Import Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Imported:".dimmed(), count(OutcomeStatus::Imported).to_string().bright_green());
    eprintln!("  {} {}", "Skipped:".dimmed(), count(OutcomeStatus::Skipped).to_string().bright_yellow());
    eprintln!("  {} {}\n", "Failed:".dimmed(), count(OutcomeStatus::Failed).to_string().bright_red());
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
