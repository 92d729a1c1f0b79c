//! Fan-out across the source adapters and score-ranked merging.
//!
//! Sources are invoked one after another in the canonical
//! [`SourceId::ALL`] order, each in its own failure domain: a source that
//! errors contributes nothing and the rest proceed. The merged list is
//! sorted by score descending with a stable sort, so articles tied on
//! score keep production order (source order first, then each source's
//! native ordering).

use crate::models::{Article, SearchFilter, SourceId};
use crate::sources::{HackerNewsSource, RedditSource, TechCrunchSource, VentureBeatSource};
use std::collections::HashSet;
use tracing::{error, info, instrument};

/// Outcome of one source during an aggregation call.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: SourceId,
    /// Articles the source contributed after filtering.
    pub articles: usize,
    /// The failure, if the source errored instead of contributing.
    pub error: Option<String>,
}

/// Ranked articles plus per-source outcomes in invocation order.
///
/// The report is how callers distinguish "the source had nothing" from
/// "the source broke"; the article list alone cannot tell them apart.
#[derive(Debug)]
pub struct AggregateReport {
    pub articles: Vec<Article>,
    pub sources: Vec<SourceReport>,
}

/// Owns one adapter per source and merges their results.
pub struct NewsAggregator {
    hackernews: HackerNewsSource,
    reddit: RedditSource,
    techcrunch: TechCrunchSource,
    venturebeat: VentureBeatSource,
}

impl Default for NewsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsAggregator {
    /// Aggregator over the production endpoints.
    pub fn new() -> Self {
        NewsAggregator {
            hackernews: HackerNewsSource::new(),
            reddit: RedditSource::new(),
            techcrunch: TechCrunchSource::new(),
            venturebeat: VentureBeatSource::new(),
        }
    }

    /// Aggregator over caller-supplied adapters. Tests point these at
    /// local mock servers.
    pub fn with_sources(
        hackernews: HackerNewsSource,
        reddit: RedditSource,
        techcrunch: TechCrunchSource,
        venturebeat: VentureBeatSource,
    ) -> Self {
        NewsAggregator {
            hackernews,
            reddit,
            techcrunch,
            venturebeat,
        }
    }

    /// Fetch, filter, and rank articles from the selected sources.
    ///
    /// `keywords` is a raw comma-separated string; blank means no keyword
    /// filtering. `timeframe_days` bounds how old timestamped items may
    /// be. Only sources in `selected` are invoked; an empty selection
    /// yields an empty list without any network activity. The result is
    /// every surviving article, best score first, untruncated.
    pub async fn aggregate(
        &self,
        keywords: &str,
        timeframe_days: i64,
        selected: &HashSet<SourceId>,
    ) -> Vec<Article> {
        self.aggregate_with_report(keywords, timeframe_days, selected)
            .await
            .articles
    }

    /// Like [`NewsAggregator::aggregate`], also returning per-source
    /// outcomes.
    #[instrument(level = "info", skip_all)]
    pub async fn aggregate_with_report(
        &self,
        keywords: &str,
        timeframe_days: i64,
        selected: &HashSet<SourceId>,
    ) -> AggregateReport {
        let filter = SearchFilter::new(keywords, timeframe_days);
        info!(
            keywords = ?filter.keywords,
            timeframe_days,
            sources = selected.len(),
            "Aggregating news"
        );

        let mut articles: Vec<Article> = Vec::new();
        let mut sources = Vec::new();
        for id in SourceId::ALL {
            if !selected.contains(&id) {
                continue;
            }
            let result = match id {
                SourceId::HackerNews => self.hackernews.fetch(&filter).await,
                SourceId::Reddit => self.reddit.fetch(&filter).await,
                SourceId::TechCrunch => self.techcrunch.fetch(&filter).await,
                SourceId::VentureBeat => self.venturebeat.fetch(&filter).await,
            };
            match result {
                Ok(batch) => {
                    sources.push(SourceReport {
                        source: id,
                        articles: batch.len(),
                        error: None,
                    });
                    articles.extend(batch);
                }
                Err(e) => {
                    error!(source = %id, error = %e, "Source failed; continuing without it");
                    sources.push(SourceReport {
                        source: id,
                        articles: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        // Stable sort: ties keep production order.
        articles.sort_by(|a, b| b.score.cmp(&a.score));
        info!(count = articles.len(), "Aggregation complete");
        AggregateReport { articles, sources }
    }
}
