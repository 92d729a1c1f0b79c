//! Command-line interface definitions for newsgather.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate, plus the parser that turns a `--sources` string into the set of
//! source adapters to invoke.

use clap::{Parser, Subcommand};
use newsgather::SourceId;
use std::collections::HashSet;
use std::error::Error;

/// Command-line arguments for the newsgather application.
///
/// # Examples
///
/// ```sh
/// # Front page: everything from the last week, ranked
/// newsgather search
///
/// # Keyword search over two sources, last two days, as JSON
/// newsgather search -k "ai, llm" -d 2 --sources hackernews,reddit --json
///
/// # Pull readable text from an article URL
/// newsgather extract https://example.com/story
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch, filter, and rank articles from the selected sources
    Search {
        /// Comma-separated keywords; blank matches every title
        #[arg(short, long, default_value = "")]
        keywords: String,

        /// How many days back timestamped articles may reach
        #[arg(short, long, default_value_t = 7)]
        days: i64,

        /// Comma-separated sources, or "all" (hackernews, reddit, techcrunch, venturebeat)
        #[arg(short, long, default_value = "all")]
        sources: String,

        /// Print at most this many articles
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Emit the results as pretty-printed JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch a URL and print its readable article text
    Extract {
        /// Article URL to pull text from
        url: String,
    },

    /// List the supported sources and their names
    Sources,
}

/// Parse a `--sources` value into the set of sources to invoke.
///
/// Accepts `all` or a comma-separated list of source names (the short
/// aliases `hn`, `tc`, and `vb` work too). Unknown names are an error
/// rather than being silently dropped.
pub fn parse_sources(raw: &str) -> Result<HashSet<SourceId>, Box<dyn Error>> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(SourceId::ALL.into_iter().collect());
    }
    let mut selected = HashSet::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        selected.insert(token.parse::<SourceId>()?);
    }
    Ok(selected)
}
