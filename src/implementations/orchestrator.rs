use chrono::Utc;
use futures::stream::{ self, StreamExt };
use log::{ info, warn };

use crate::implementations::analysis_client::AnalysisClient;
use crate::models::outcome::{ AnalysisOutcome, BatchReport, FailureKind };
use crate::models::source::SourceArtifact;

/// Analyses a batch of competitor sources, one outcome per source.
///
/// A failing source never stops the batch. With `concurrency > 1` several
/// sources are in flight at once, but outcomes still come back in input order.
pub struct BatchOrchestrator<'a> {
    client: &'a AnalysisClient,
    concurrency: usize,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(client: &'a AnalysisClient) -> Self {
        Self { client, concurrency: 1 }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(&self, sources: Vec<SourceArtifact>) -> BatchReport {
        let started_at = Utc::now();
        let total = sources.len();
        info!("Analysing {} sources (concurrency {})", total, self.concurrency);

        let outcomes: Vec<AnalysisOutcome> = stream
            ::iter(
                sources
                    .into_iter()
                    .enumerate()
                    .map(|(index, source)| self.analyze_source(index, total, source))
            )
            .buffered(self.concurrency)
            .collect().await;

        let report = BatchReport::new(outcomes, started_at, Utc::now());
        let counts = report.counts();
        info!(
            "Batch finished: {} succeeded, {} failed, {} total",
            counts.success,
            counts.failure,
            counts.total
        );
        report
    }

    async fn analyze_source(
        &self,
        index: usize,
        total: usize,
        source: SourceArtifact
    ) -> AnalysisOutcome {
        info!("[{}/{}] {}", index + 1, total, source.url);

        if let Some(error) = source.fetch_error() {
            warn!("Skipping {}: fetch failed: {}", source.url, error);
            return AnalysisOutcome::Failure {
                error: error.to_string(),
                url: source.url,
                kind: FailureKind::Fetch,
            };
        }

        let result = match source.screenshot() {
            Some(screenshot) =>
                self.client.analyze_website_screenshot(
                    screenshot,
                    &source.url,
                    source.title.as_deref(),
                    source.h1.as_deref(),
                    source.first_paragraph.as_deref()
                ).await,
            None =>
                self.client.analyze_parsed_content(
                    source.title.as_deref(),
                    source.h1.as_deref(),
                    source.first_paragraph.as_deref()
                ).await,
        };

        match result {
            Ok(analysis) => AnalysisOutcome::Success { url: source.url, analysis },
            Err(e) => {
                warn!("Analysis of {} failed: {}", source.url, e);
                AnalysisOutcome::Failure {
                    url: source.url,
                    kind: FailureKind::Transport,
                    error: e.to_string(),
                }
            }
        }
    }
}
