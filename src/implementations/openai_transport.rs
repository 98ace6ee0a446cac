use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::Deserialize;

use crate::config::{ ApiConfig, ConfigError };
use crate::errors::TransportError;
use crate::models::message::{ ChatCompletion, ChatRequest, Usage };
use crate::traits::chat_transport::ChatTransport;

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    usage: Option<Usage>,
}

/// Chat-completion transport for OpenAI-compatible APIs such as ProxyAPI.
///
/// Requests go to `{base_url}/chat/completions` with a bearer token.
#[derive(Clone)]
pub struct OpenAiTransport {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();

        let http_client = reqwest::Client
            ::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                name: "http client".to_string(),
                value: e.to_string(),
            })?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        info!("Model endpoint: {}", endpoint);
        info!("API key: {}", config.masked_api_key());

        Ok(Self { http_client, endpoint, api_key })
    }
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, TransportError> {
        debug!("Sending request to {}", self.endpoint);
        debug!("Model: {}", request.model);
        debug!("Temperature: {}", request.temperature);
        debug!("Max tokens: {}", request.max_tokens);

        let response = self.http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(request)
            .send().await
            .map_err(|e| {
                warn!("Network error when calling model API: {}", e);
                TransportError::from_reqwest(e)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(TransportError::Http {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get text from response: {}", e);
            TransportError::MalformedResponse(e.to_string())
        })?;

        debug!("Response length: {} characters", response_text.len());
        parse_chat_response(&response_text)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

/// Pull the first choice's text and the usage block out of a response body
pub fn parse_chat_response(body: &str) -> Result<ChatCompletion, TransportError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        warn!("Failed to parse API response: {}", e);
        TransportError::MalformedResponse(format!("Invalid JSON response: {}", e))
    })?;

    let choice = response.choices.into_iter().next().ok_or_else(|| {
        warn!("API returned empty choices array");
        TransportError::MalformedResponse("No choices in API response".to_string())
    })?;

    let content = choice.message.content.ok_or_else(|| {
        warn!("First choice has no message content");
        TransportError::MalformedResponse("Missing message content in API response".to_string())
    })?;

    Ok(ChatCompletion { content, usage: response.usage })
}
