//! Command-line entry point for newsgather.
//!
//! Wires the CLI subcommands to the library: `search` aggregates and
//! prints ranked articles, `extract` prints readable text for one URL,
//! and `sources` lists the supported outlets.

use clap::Parser;
use newsgather::{NewsAggregator, SourceId, extract_article_content};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Command, parse_sources};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsgather starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    match args.command {
        Command::Search {
            keywords,
            days,
            sources,
            limit,
            json,
        } => {
            run_search(&keywords, days, &sources, limit, json).await?;
        }
        Command::Extract { url } => {
            run_extract(&url).await;
        }
        Command::Sources => {
            for id in SourceId::ALL {
                println!("{:<12} {}", id.to_string(), id.label());
            }
        }
    }

    info!(elapsed = ?start_time.elapsed(), "newsgather finished");
    Ok(())
}

/// Aggregate from the selected sources and print the ranked results.
async fn run_search(
    keywords: &str,
    days: i64,
    sources: &str,
    limit: usize,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let selected = parse_sources(sources)?;
    let aggregator = NewsAggregator::new();
    let report = aggregator
        .aggregate_with_report(keywords, days, &selected)
        .await;

    let failed = report.sources.iter().filter(|s| s.error.is_some()).count();
    if failed > 0 {
        warn!(failed, "Some sources failed; results are partial");
    }

    let shown = &report.articles[..report.articles.len().min(limit)];
    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No articles matched.");
        return Ok(());
    }

    for (rank, article) in shown.iter().enumerate() {
        println!("{:>2}. [{:>5}] {}", rank + 1, article.score, article.title);
        println!(
            "    {} | {} | {} comments",
            article.source, article.date, article.comments
        );
        println!("    {}", article.url);
    }
    info!(
        shown = shown.len(),
        total = report.articles.len(),
        "Search complete"
    );
    Ok(())
}

/// Fetch one URL and print whatever readable text came out of it.
async fn run_extract(url: &str) {
    let content = extract_article_content(url).await;
    if content.is_empty() {
        warn!(%url, "No readable content extracted");
    } else {
        println!("{content}");
    }
}
