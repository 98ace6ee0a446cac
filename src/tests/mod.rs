mod orchestrator_tests;
mod scraper_tests;

use async_trait::async_trait;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::{ Arc, Mutex };
use std::time::Duration;

use crate::errors::TransportError;
use crate::implementations::analysis_client::{ AnalysisClient, ModelSettings };
use crate::models::message::{ ChatCompletion, ChatRequest };
use crate::traits::chat_transport::ChatTransport;

pub(crate) const COMPETITOR_JSON: &str =
    r#"{
  "strengths": ["Оперативные новости", "Много фото"],
  "weaknesses": ["Перегруженная главная"],
  "unique_offers": ["Ежедневный видеодайджест"],
  "recommendations": ["Упростить навигацию"],
  "summary": "Портал с сильной городской повесткой"
}"#;

enum Reply {
    Content(String),
    Fail(fn() -> TransportError),
}

struct Rule {
    needle: String,
    reply: Reply,
    delay: Duration,
}

/// Scripted transport: the first rule whose needle occurs in the request's
/// user message decides the reply; unmatched requests get the fallback.
pub(crate) struct MockTransport {
    rules: Vec<Rule>,
    fallback: String,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockTransport {
    pub fn replying(fallback: &str) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.to_string(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_when(mut self, needle: &str, content: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            reply: Reply::Content(content.to_string()),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn delay_when(mut self, needle: &str, content: &str, delay: Duration) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            reply: Reply::Content(content.to_string()),
            delay,
        });
        self
    }

    pub fn fail_when(mut self, needle: &str, error: fn() -> TransportError) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            reply: Reply::Fail(error),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let user_text = request.messages
            .last()
            .map(|m| m.content.text())
            .unwrap_or_default();

        match self.rules.iter().find(|r| user_text.contains(&r.needle)) {
            Some(rule) => {
                if !rule.delay.is_zero() {
                    tokio::time::sleep(rule.delay).await;
                }
                match &rule.reply {
                    Reply::Content(content) => Ok(ChatCompletion::new(content.clone())),
                    Reply::Fail(make_error) => Err(make_error()),
                }
            }
            None => Ok(ChatCompletion::new(self.fallback.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

pub(crate) fn test_settings() -> ModelSettings {
    ModelSettings {
        text_model: "text-model".to_string(),
        vision_model: "vision-model".to_string(),
        temperature: 0.7,
        text_max_tokens: 2000,
        image_max_tokens: 2000,
        combined_max_tokens: 3000,
    }
}

pub(crate) fn client_with(transport: &Arc<MockTransport>) -> AnalysisClient {
    AnalysisClient::new(test_settings(), transport.clone())
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
