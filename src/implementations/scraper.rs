use async_trait::async_trait;
use log::{ debug, info, warn };
use regex::Regex;
use std::sync::LazyLock;

use crate::config::{ ConfigError, ScraperConfig };
use crate::models::source::SourceArtifact;
use crate::traits::source_fetcher::SourceFetcher;

/// Paragraphs shorter than this are treated as navigation or captions
const MIN_PARAGRAPH_CHARS: usize = 40;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern is valid")
});

static H1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("h1 pattern is valid")
});

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").expect("paragraph pattern is valid")
});

static NON_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)[^>]*>.*?</(?:script|style|noscript)>").expect(
        "non-content pattern is valid"
    )
});

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("whitespace pattern is valid")
});

/// Text fields pulled out of a page's HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageText {
    pub title: Option<String>,
    pub h1: Option<String>,
    pub first_paragraph: Option<String>,
}

/// Extract title, first H1 and the first substantial paragraph from raw HTML
pub fn extract_page_text(html: &str) -> PageText {
    let html = NON_CONTENT.replace_all(html, " ");

    let paragraphs: Vec<String> = PARAGRAPH.captures_iter(&html)
        .filter_map(|c| c.get(1).map(|m| clean_text(m.as_str())))
        .filter(|t| !t.is_empty())
        .collect();

    let first_paragraph = paragraphs
        .iter()
        .find(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .or_else(|| paragraphs.first())
        .cloned();

    PageText {
        title: first_capture(&TITLE, &html),
        h1: first_capture(&H1, &html),
        first_paragraph,
    }
}

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| clean_text(m.as_str())))
        .find(|t| !t.is_empty())
}

/// Strip tags, decode entities and collapse whitespace
pub fn clean_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Fetches competitor pages over plain HTTP, with optional Browserless screenshots
pub struct HttpSourceFetcher {
    client: reqwest::Client,
    screenshot_endpoint: Option<String>,
    browserless_token: Option<String>,
    concurrency: usize,
}

impl HttpSourceFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client
            ::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                name: "http client".to_string(),
                value: e.to_string(),
            })?;

        let screenshot_endpoint = config.browserless_url
            .as_deref()
            .map(|base| format!("{}/screenshot", base.trim_end_matches('/')));

        match &config.browserless_url {
            Some(base) => info!("Screenshots via Browserless at {}", base),
            None => info!("No Browserless URL configured, pages are fetched without screenshots"),
        }

        Ok(Self {
            client,
            screenshot_endpoint,
            browserless_token: config.browserless_token.clone(),
            concurrency: config.concurrency.max(1),
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, String> {
        let response = self.client
            .get(url)
            .send().await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response.text().await.map_err(|e| format!("Failed to read page body: {}", e))
    }

    pub(crate) fn screenshot_request(&self, endpoint: &str, url: &str) -> reqwest::RequestBuilder {
        let body =
            serde_json::json!({
            "url": url,
            "options": { "type": "jpeg", "quality": 70, "fullPage": false }
        });

        let request = self.client.post(endpoint).json(&body);
        match &self.browserless_token {
            Some(token) => request.query(&[("token", token)]),
            None => request,
        }
    }

    pub(crate) fn screenshot_endpoint(&self) -> Option<&str> {
        self.screenshot_endpoint.as_deref()
    }

    async fn capture_screenshot(&self, endpoint: &str, url: &str) -> Option<Vec<u8>> {
        let response = match self.screenshot_request(endpoint, url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Screenshot request for {} failed: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Screenshot service returned HTTP {} for {}", response.status().as_u16(), url);
            return None;
        }

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes.to_vec()),
            Ok(_) => {
                warn!("Screenshot service returned an empty image for {}", url);
                None
            }
            Err(e) => {
                warn!("Failed to read screenshot for {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch(&self, url: &str) -> SourceArtifact {
        info!("Fetching {}", url);

        let html = match self.fetch_html(url).await {
            Ok(html) => html,
            Err(error) => {
                warn!("Failed to fetch {}: {}", url, error);
                return SourceArtifact::failed(url, error);
            }
        };

        let page = extract_page_text(&html);
        debug!("{}: title={:?} h1={:?}", url, page.title, page.h1);

        let screenshot = match self.screenshot_endpoint() {
            Some(endpoint) => self.capture_screenshot(endpoint, url).await,
            None => None,
        };

        SourceArtifact {
            url: url.to_string(),
            title: page.title,
            h1: page.h1,
            first_paragraph: page.first_paragraph,
            screenshot,
            fetch_error: None,
        }
    }

    fn concurrency(&self) -> usize {
        self.concurrency
    }
}
