use async_trait::async_trait;

use crate::errors::TransportError;
use crate::models::message::{ ChatCompletion, ChatRequest };

/// An OpenAI-compatible chat-completion endpoint
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one request and return the first choice's text.
    ///
    /// Implementations issue exactly one outbound call and never retry.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, TransportError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
