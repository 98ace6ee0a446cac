pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ApiConfig, ConfigError, MonitorConfig, ScraperConfig};
pub use errors::{MonitorError, MonitorResult, TransportError};
pub use implementations::analysis_client::{AnalysisClient, ModelSettings};
pub use implementations::extractor::extract;
pub use implementations::openai_transport::OpenAiTransport;
pub use implementations::orchestrator::BatchOrchestrator;
pub use implementations::prompts::{Prompt, PromptMode};
pub use implementations::scraper::HttpSourceFetcher;
pub use models::{
    analysis::{CompetitorAnalysis, ImageAnalysis},
    message::{ChatCompletion, ChatMessage, ChatRequest},
    outcome::{AnalysisOutcome, BatchReport, FailureKind, OutcomeCounts},
    source::SourceArtifact,
};
pub use traits::{ChatTransport, SourceFetcher};
