use serde::{ Deserialize, Serialize };

/// Scraped artifacts for one competitor URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceArtifact {
    pub url: String,
    pub title: Option<String>,
    pub h1: Option<String>,
    pub first_paragraph: Option<String>,
    /// Raw image bytes, never serialized into reports
    #[serde(skip)]
    pub screenshot: Option<Vec<u8>>,
    pub fetch_error: Option<String>,
}

impl SourceArtifact {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Artifact for a URL the scraper could not fetch
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fetch_error: Some(error.into()),
            ..Self::default()
        }
    }

    /// The scraper's error, if it reported a non-empty one
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref().filter(|e| !e.is_empty())
    }

    /// The screenshot, if a non-empty one was captured
    pub fn screenshot(&self) -> Option<&[u8]> {
        self.screenshot.as_deref().filter(|s| !s.is_empty())
    }
}
