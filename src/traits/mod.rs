pub mod chat_transport;
pub mod source_fetcher;

// Re-export traits
pub use chat_transport::ChatTransport;
pub use source_fetcher::SourceFetcher;
