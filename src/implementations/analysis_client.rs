use log::{ debug, error, info, warn };
use std::sync::Arc;
use std::time::Instant;

use crate::config::{ ApiConfig, ConfigError };
use crate::errors::MonitorResult;
use crate::implementations::extractor::{ extract, preview };
use crate::implementations::openai_transport::OpenAiTransport;
use crate::implementations::prompts::{
    self,
    PageContext,
    Prompt,
    PromptMode,
    compose_page_text,
    detect_image_mime,
};
use crate::models::analysis::{ CompetitorAnalysis, ImageAnalysis };
use crate::models::message::ChatRequest;
use crate::traits::chat_transport::ChatTransport;

/// Model names and generation budgets, fixed for the lifetime of a client
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub text_model: String,
    pub vision_model: String,
    pub temperature: f32,
    pub text_max_tokens: u32,
    pub image_max_tokens: u32,
    pub combined_max_tokens: u32,
}

impl ModelSettings {
    fn model_for(&self, mode: PromptMode) -> &str {
        if mode.needs_vision() { &self.vision_model } else { &self.text_model }
    }

    fn max_tokens_for(&self, mode: PromptMode) -> u32 {
        match mode {
            PromptMode::Text => self.text_max_tokens,
            PromptMode::Image => self.image_max_tokens,
            PromptMode::Combined => self.combined_max_tokens,
        }
    }
}

impl From<&ApiConfig> for ModelSettings {
    fn from(config: &ApiConfig) -> Self {
        Self {
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
            temperature: config.temperature,
            text_max_tokens: config.text_max_tokens,
            image_max_tokens: config.image_max_tokens,
            combined_max_tokens: config.combined_max_tokens,
        }
    }
}

/// Runs competitor analyses against a chat-completion transport.
///
/// Every public operation sends at most one request and never retries;
/// transport errors are returned to the caller unchanged. Model output that
/// cannot be parsed degrades to default-valued results instead of failing.
#[derive(Clone)]
pub struct AnalysisClient {
    settings: ModelSettings,
    transport: Arc<dyn ChatTransport>,
}

impl AnalysisClient {
    pub fn new(settings: ModelSettings, transport: Arc<dyn ChatTransport>) -> Self {
        info!("Analysis client ready (transport: {})", transport.name());
        info!("  Text model: {}", settings.text_model);
        info!("  Vision model: {}", settings.vision_model);
        Self { settings, transport }
    }

    /// Build a client backed by the HTTP transport described in `config`
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let transport = OpenAiTransport::new(config)?;
        Ok(Self::new(ModelSettings::from(config), Arc::new(transport)))
    }

    /// Analyse competitor text with the text model
    pub async fn analyze_text(&self, text: &str) -> MonitorResult<CompetitorAnalysis> {
        info!("Analysing competitor text ({} characters)", text.chars().count());
        debug!("Preview: {}", preview(text, 100));

        let content = self.send(prompts::text_prompt(text)).await?;
        let result = CompetitorAnalysis::from_mapping(&extract(&content));

        info!(
            "Result: {} strengths, {} weaknesses",
            result.strengths.len(),
            result.weaknesses.len()
        );
        Ok(result)
    }

    /// Analyse an image (banner, page screenshot) with the vision model
    pub async fn analyze_image(&self, image: &[u8], mime_type: &str) -> MonitorResult<ImageAnalysis> {
        info!("Analysing image ({} bytes, {})", image.len(), mime_type);

        let content = self.send(prompts::image_prompt(image, mime_type)).await?;
        let result = ImageAnalysis::from_mapping(&extract(&content));

        info!("Result: visual style score {}/10", result.visual_style_score);
        info!(
            "Insights: {}, recommendations: {}",
            result.marketing_insights.len(),
            result.recommendations.len()
        );
        Ok(result)
    }

    /// Analyse scraped page text; skips the model entirely when there is none
    pub async fn analyze_parsed_content(
        &self,
        title: Option<&str>,
        h1: Option<&str>,
        paragraph: Option<&str>
    ) -> MonitorResult<CompetitorAnalysis> {
        debug!("Title: {}", title.map(|t| preview(t, 50)).unwrap_or_else(|| "N/A".to_string()));
        debug!("H1: {}", h1.map(|t| preview(t, 50)).unwrap_or_else(|| "N/A".to_string()));

        match compose_page_text(title, h1, paragraph) {
            Some(text) => self.analyze_text(&text).await,
            None => {
                warn!("No page content available, returning empty analysis");
                Ok(CompetitorAnalysis::no_content())
            }
        }
    }

    /// Combined analysis of a site screenshot plus whatever page text is known
    pub async fn analyze_website_screenshot(
        &self,
        screenshot: &[u8],
        url: &str,
        title: Option<&str>,
        h1: Option<&str>,
        first_paragraph: Option<&str>
    ) -> MonitorResult<CompetitorAnalysis> {
        info!("Combined analysis of {}", url);
        info!("  Screenshot: {} bytes", screenshot.len());

        let page = PageContext { url, title, h1, first_paragraph };
        let prompt = prompts::combined_prompt(screenshot, detect_image_mime(screenshot), &page);

        let content = self.send(prompt).await?;
        let result = CompetitorAnalysis::from_mapping(&extract(&content));

        info!(
            "Result: {} strengths, {} weaknesses, {} unique offers, {} recommendations",
            result.strengths.len(),
            result.weaknesses.len(),
            result.unique_offers.len(),
            result.recommendations.len()
        );
        debug!("Summary: {}", preview(&result.summary, 100));
        Ok(result)
    }

    /// Send one prompt and return the raw completion text
    async fn send(&self, prompt: Prompt) -> MonitorResult<String> {
        let request = ChatRequest {
            model: self.settings.model_for(prompt.mode).to_string(),
            messages: prompt.messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens_for(prompt.mode),
        };

        info!("Sending {} prompt to model {}", prompt.mode, request.model);
        let started = Instant::now();

        match self.transport.complete(&request).await {
            Ok(completion) => {
                let elapsed = started.elapsed();
                info!("Response received in {:.2} s", elapsed.as_secs_f64());
                info!("Response length: {} characters", completion.content.chars().count());
                if let Some(usage) = completion.usage {
                    debug!(
                        "Tokens used: {} (prompt {}, completion {})",
                        usage.total_tokens,
                        usage.prompt_tokens,
                        usage.completion_tokens
                    );
                }
                Ok(completion.content)
            }
            Err(e) => {
                error!("Model call failed after {:.2} s: {}", started.elapsed().as_secs_f64(), e);
                Err(e.into())
            }
        }
    }
}
