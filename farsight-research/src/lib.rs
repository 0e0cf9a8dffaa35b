//! Multi-stage research: one search, a bounded deep dive into the top
//! results, and a single markdown report assembled from whatever survived.
//!
//! The overview section is deliberately broader than the deep dive: the
//! search asks for `depth + 2` hits, all of them are listed, and only the
//! first `depth` get fetched and analysed. A source that cannot be fetched
//! degrades to one "could not access" line; it never aborts the run. Only
//! total search failure ends the pipeline early.

use std::sync::Arc;

use farsight_web::extract;
use farsight_web::{FetchOutcome, PageFetcher, SearchClient, SearchResult};

mod report;

use report::ReportBuilder;

/// Extra hits requested beyond the deep-dive set, shown in the overview only.
const OVERVIEW_EXTRA: usize = 2;

pub struct ResearchPipeline {
    search: Arc<dyn SearchClient>,
    fetcher: Arc<dyn PageFetcher>,
}

impl ResearchPipeline {
    pub fn new(search: Arc<dyn SearchClient>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { search, fetcher }
    }

    /// Run the whole pipeline for `topic`. Never fails: every failure mode
    /// becomes report text.
    pub async fn research(&self, topic: &str, depth: usize) -> String {
        let depth = depth.max(1);

        let mut results = match self.search.search(topic, depth + OVERVIEW_EXTRA).await {
            Ok(results) => results,
            Err(e) => return format!("Error performing search: {e}"),
        };
        if results.is_empty() {
            return "No results found for your topic.".to_string();
        }
        // Providers may hand back more than asked for; the overview is
        // bounded at depth + 2 regardless.
        results.truncate(depth + OVERVIEW_EXTRA);

        tracing::info!(
            target: "research",
            topic,
            depth,
            hit_count = results.len(),
            "research.start"
        );

        let mut report = ReportBuilder::new(topic);
        report.overview(&results);

        report.begin_analysis();
        for (idx, result) in results.iter().take(depth).enumerate() {
            self.analyse_source(&mut report, idx + 1, result).await;
        }

        let explored = results.len().min(depth);
        tracing::info!(target: "research", topic, explored, "research.done");
        report.finish(explored, topic)
    }

    async fn analyse_source(&self, report: &mut ReportBuilder, rank: usize, result: &SearchResult) {
        report.source_header(rank, &result.title, &result.url);

        let markup = match self.fetcher.fetch(&result.url).await {
            FetchOutcome::Success { markup } => markup,
            FetchOutcome::Failure { reason } => {
                tracing::warn!(
                    target: "research",
                    url = %result.url,
                    reason = %reason,
                    "research.source_unreachable"
                );
                report.source_unreachable(&reason);
                return;
            }
        };

        report.key_points(&extract::outline_headings(&markup));
        match extract::lead_main_content(&markup) {
            Some(text) => report.summary(&text),
            None => report.summary(&extract::page_text(&markup)),
        }
        report.end_source();
    }
}
