use async_trait::async_trait;
use futures::stream::{ self, StreamExt };

use crate::models::source::SourceArtifact;

/// Produces scraped artifacts for competitor URLs
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch a single page. Failures are reported through `fetch_error`, never as `Err`.
    async fn fetch(&self, url: &str) -> SourceArtifact;

    /// Maximum number of pages fetched at once by `fetch_all`
    fn concurrency(&self) -> usize {
        1
    }

    /// Fetch every URL, returning one artifact per URL in the same order
    async fn fetch_all(&self, urls: &[String]) -> Vec<SourceArtifact> {
        let limit = self.concurrency().max(1);
        stream::iter(urls.to_vec())
            .map(|url| async move { self.fetch(&url).await })
            .buffered(limit)
            .collect()
            .await
    }
}
