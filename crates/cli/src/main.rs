use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use futures::StreamExt;
use newsroom_core::{
    ArchiveHost, DEFAULT_ARCHIVE_HOST, Document, ExtractConfig, FetchConfig, FormattedArticle, HttpFetcher,
    ImportOutcome, OutcomeStatus, SnapshotFetcher, extract_article, filter_bulk_urls, import_all, score_article,
};
use owo_colors::OwoColorize;

mod echo;
mod remote;
mod report;

use echo::*;
use remote::RemoteImporter;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SITE_ORIGIN: &str = "https://ghanainsider.com";

/// Output format for extracted articles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Html,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, html, text", s)),
        }
    }
}

/// Recover archived articles and check their SEO
#[derive(Parser, Debug)]
#[command(name = "newsroom")]
#[command(version)]
#[command(about = "Recover archived news articles and score their SEO", long_about = None)]
struct Cli {
    /// Verbose progress on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract an article from a snapshot URL, a saved HTML file, or "-" for stdin
    Extract {
        #[arg(value_name = "INPUT")]
        input: String,

        /// Pre-archive URL of a saved page; slug and category are derived from it
        #[arg(long, value_name = "URL")]
        original_url: Option<String>,

        /// Output format (json, html, text)
        #[arg(short, long, default_value = "json", value_name = "FORMAT")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Site origin relative image URLs are resolved against
        #[arg(long, default_value = DEFAULT_SITE_ORIGIN, value_name = "URL")]
        site_origin: String,

        /// Archive host snapshot URLs are served from
        #[arg(long, default_value = DEFAULT_ARCHIVE_HOST, value_name = "HOST")]
        archive_host: String,

        /// HTTP timeout in seconds
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout: u64,
    },

    /// Score a formatted article (JSON file or "-" for stdin) against the SEO rubric
    Score {
        #[arg(value_name = "FILE")]
        input: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import a list of snapshot URLs, one per line, through a running server
    Bulk {
        /// File with one URL per line, or "-" for stdin
        #[arg(value_name = "FILE")]
        input: String,

        /// Base URL of the newsroom server
        #[arg(long, env = "NEWSROOM_SERVER", default_value = "http://127.0.0.1:3000", value_name = "URL")]
        server: String,

        /// Admin bearer token
        #[arg(long, env = "NEWSROOM_TOKEN", value_name = "TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Write a CSV report here
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only lines mentioning this site host are imported
        #[arg(long, default_value = "ghanainsider.com", value_name = "HOST")]
        site_host: String,

        #[arg(long, default_value = DEFAULT_ARCHIVE_HOST, value_name = "HOST")]
        archive_host: String,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "120", value_name = "SECS")]
        timeout: u64,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

fn write_output(output: Option<PathBuf>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, content).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_extract(
    input: String, original_url: Option<String>, format: OutputFormat, output: Option<PathBuf>, site_origin: String,
    archive_host: String, timeout: u64, verbose: bool,
) -> anyhow::Result<()> {
    let archive = ArchiveHost::new(&archive_host).context("Invalid archive host")?;
    let config = ExtractConfig::builder()
        .site_origin(&site_origin)
        .context("Invalid site origin")?
        .archive_host(archive.clone())
        .build();

    let (html, original) = if input.starts_with("http://") || input.starts_with("https://") {
        let original = archive.original_url(&input).context("Not a snapshot URL")?.to_string();
        if verbose {
            print_step(1, 3, &format!("Fetching {}", input.bright_white().underline()));
        }
        let fetcher = HttpFetcher::new(&FetchConfig { timeout, ..Default::default() })?;
        let html = fetcher.fetch(&input).await.context("Failed to fetch snapshot")?;
        (html, original_url.unwrap_or(original))
    } else {
        if verbose {
            print_step(1, 3, &format!("Reading {}", input.bright_white()));
        }
        let html = read_input(&input)?;
        let Some(original) = original_url else {
            bail!("--original-url is required when extracting from a file or stdin");
        };
        (html, original)
    };

    if verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), format_size(html.len()).bright_white());
        print_step(2, 3, "Extracting article");
    }

    let article = extract_article(&html, &original, &config).context("Failed to extract article")?;

    if verbose {
        print_extraction_details(&article);
        print_step(3, 3, "Writing output");
    }

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&article).context("Failed to serialize article")? + "\n",
        OutputFormat::Html => article.content,
        OutputFormat::Text => Document::parse_fragment(&article.content).text_content(),
    };
    write_output(output, &rendered)
}

fn run_score(input: &str, json: bool) -> anyhow::Result<()> {
    let raw = read_input(input)?;
    let article: FormattedArticle = serde_json::from_str(&raw).context("Input is not a formatted article")?;
    let report = score_article(&article);

    if json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize report")?);
    } else {
        if !article.title.is_empty() {
            println!("{}\n", article.title.bold());
        }
        print_seo_report(&report);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_bulk(
    input: String, server: String, token: Option<String>, output: Option<PathBuf>, site_host: String,
    archive_host: String, timeout: u64, verbose: bool,
) -> anyhow::Result<()> {
    let text = read_input(&input)?;
    let urls = filter_bulk_urls(&text, &archive_host, &site_host);
    if urls.is_empty() {
        bail!("No valid archive URLs found (lines must mention {} and {})", archive_host, site_host);
    }

    if verbose {
        print_info(&format!("Importing {} URLs through {}", urls.len(), server.bright_white()));
    }

    let total = urls.len();
    let runner = Arc::new(RemoteImporter::new(&server, token, timeout)?);
    let mut stream = Box::pin(import_all(runner, urls));
    let mut outcomes: Vec<ImportOutcome> = Vec::with_capacity(total);
    while let Some(outcome) = stream.next().await {
        print_outcome(outcomes.len() + 1, total, &outcome);
        outcomes.push(outcome);
    }

    print_bulk_summary(&outcomes);

    if let Some(path) = output {
        let file = fs::File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_csv(io::BufWriter::new(file), &outcomes)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        print_success(&format!("Report written to {}", path.display().bright_white()));
    }

    if outcomes.iter().all(|o| o.status == OutcomeStatus::Failed) {
        print_warning("Every import failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        print_banner();
    }

    let result = match cli.command {
        Command::Extract { input, original_url, format, output, site_origin, archive_host, timeout } => {
            run_extract(input, original_url, format, output, site_origin, archive_host, timeout, cli.verbose).await
        }
        Command::Score { input, json } => run_score(&input, json),
        Command::Bulk { input, server, token, output, site_host, archive_host, timeout } => {
            run_bulk(input, server, token, output, site_host, archive_host, timeout, cli.verbose).await
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "newsroom", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
