pub mod analysis;
pub mod message;
pub mod outcome;
pub mod source;

// Re-export common model types
pub use analysis::{CompetitorAnalysis, ImageAnalysis, DEFAULT_VISUAL_STYLE_SCORE};
pub use message::{ChatCompletion, ChatMessage, ChatRequest, ContentPart, ImageUrl, MessageContent, Role, Usage};
pub use outcome::{AnalysisOutcome, BatchReport, FailureKind, OutcomeCounts};
pub use source::SourceArtifact;
