pub mod analysis_client;
pub mod extractor;
pub mod openai_transport;
pub mod orchestrator;
pub mod prompts;
pub mod scraper;
