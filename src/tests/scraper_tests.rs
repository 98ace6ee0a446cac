use async_trait::async_trait;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::implementations::scraper::{ clean_text, extract_page_text, HttpSourceFetcher };
use crate::models::source::SourceArtifact;
use crate::traits::source_fetcher::SourceFetcher;

/// Answers later for earlier URLs, so completion order is the reverse of input order
struct StaggeredFetcher;

#[async_trait]
impl SourceFetcher for StaggeredFetcher {
    async fn fetch(&self, url: &str) -> SourceArtifact {
        let rank = url.trim_start_matches("https://s").trim_end_matches(".ru/").parse::<u64>().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(60 - rank * 20)).await;
        if url.contains("s1") {
            SourceArtifact::failed(url, "HTTP 500")
        } else {
            SourceArtifact::new(url)
        }
    }

    fn concurrency(&self) -> usize {
        3
    }
}

const PAGE: &str =
    r#"<!DOCTYPE html>
<html>
<head>
  <title>Новости Читы &mdash; CHITA.RU</title>
  <script>var title = "<title>not this</title>";</script>
  <style>p { color: red; }</style>
</head>
<body>
  <nav><p>Меню</p></nav>
  <h1 class="main">  Главные <span>новости</span> дня </h1>
  <p class="lead">В Чите открыли новый мост через реку Ингоду &laquo;после ремонта&raquo;, движение восстановлено.</p>
  <p>Второй абзац.</p>
</body>
</html>"#;

#[test]
fn page_text_is_extracted_from_html() {
    let page = extract_page_text(PAGE);

    assert_eq!(page.title.as_deref(), Some("Новости Читы — CHITA.RU"));
    assert_eq!(page.h1.as_deref(), Some("Главные новости дня"));
    assert_eq!(
        page.first_paragraph.as_deref(),
        Some("В Чите открыли новый мост через реку Ингоду «после ремонта», движение восстановлено.")
    );
}

#[test]
fn short_paragraphs_are_used_when_nothing_longer_exists() {
    let page = extract_page_text("<p></p><p>Коротко</p><p>Ещё</p>");

    assert_eq!(page.first_paragraph.as_deref(), Some("Коротко"));
    assert_eq!(page.title, None);
    assert_eq!(page.h1, None);
}

#[test]
fn tags_are_stripped_and_entities_decoded() {
    assert_eq!(clean_text("<b>Tom</b> &amp; <i>Jerry</i>&nbsp;&quot;show&quot;"), "Tom & Jerry \"show\"");
    assert_eq!(
        clean_text("&#171;Чита&#187; &hellip; &#8212; &#x2014; &laquo;ok&raquo;"),
        "«Чита» … — — «ok»"
    );
}

#[test]
fn browserless_token_is_sent_as_encoded_query() {
    let config = ScraperConfig {
        browserless_url: Some("http://localhost:3000/".to_string()),
        browserless_token: Some("a b&c=d".to_string()),
        ..ScraperConfig::default()
    };
    let fetcher = HttpSourceFetcher::new(&config).unwrap();

    let endpoint = fetcher.screenshot_endpoint().unwrap();
    assert_eq!(endpoint, "http://localhost:3000/screenshot");

    let request = fetcher.screenshot_request(endpoint, "https://zab.ru/").build().unwrap();
    let pairs: Vec<(String, String)> = request
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs, vec![("token".to_string(), "a b&c=d".to_string())]);
    assert_eq!(request.url().path(), "/screenshot");
}

#[test]
fn screenshot_request_has_no_query_without_token() {
    let config = ScraperConfig {
        browserless_url: Some("http://localhost:3000".to_string()),
        ..ScraperConfig::default()
    };
    let fetcher = HttpSourceFetcher::new(&config).unwrap();

    let request = fetcher.screenshot_request("http://localhost:3000/screenshot", "https://zab.ru/").build().unwrap();
    assert_eq!(request.url().query(), None);
}

#[tokio::test]
async fn fetch_all_returns_one_artifact_per_url_in_order() {
    let urls: Vec<String> = (0..3).map(|i| format!("https://s{}.ru/", i)).collect();

    let artifacts = StaggeredFetcher.fetch_all(&urls).await;

    let fetched: Vec<&str> = artifacts
        .iter()
        .map(|a| a.url.as_str())
        .collect();
    assert_eq!(fetched, vec!["https://s0.ru/", "https://s1.ru/", "https://s2.ru/"]);
    assert_eq!(artifacts[1].fetch_error(), Some("HTTP 500"));
    assert_eq!(artifacts[0].fetch_error(), None);
}
