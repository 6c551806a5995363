//! # llm-sentiment
//!
//! Sentiment analysis for social-media-like posts behind a minimal HTTP
//! service, with two interchangeable backends:
//!
//! - **LLM dispatch core**: routes each text to one of four provider APIs
//!   (OpenAI, Anthropic, Google, DeepSeek, plus any OpenAI-compatible
//!   endpoint), with data-driven adapters, transport-only retry with
//!   exponential backoff, strict structured-response validation, bounded
//!   batch concurrency and graceful degradation to a neutral fallback.
//! - **Lexicon scorer**: a fast, deterministic local VADER-style backend.
//!
//! Per-text analysis is total: once a batch is accepted, every text gets a
//! fully populated result, failures included.
//!
//! ## Example
//!
//! ```rust,no_run
//! use llm_sentiment::analyzer::LlmSentimentAnalyzer;
//! use llm_sentiment::config::LlmConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let analyzer = LlmSentimentAnalyzer::new(LlmConfig::from_env()?)?;
//! let texts = vec!["I love it! 😍".to_string(), "Terrible experience 😡".to_string()];
//! let results = analyzer.analyze_batch(&texts).await;
//! assert_eq!(results.len(), texts.len());
//! # Ok(())
//! # }
//! ```

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod analyzer;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod post;
pub mod prompt;
pub mod providers;
pub mod retry;
pub mod server;
pub mod types;
pub mod validate;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use analyzer::{BackendDescriptor, LlmSentimentAnalyzer, SentimentBackend};
pub use config::{LlmConfig, Provider};
pub use error::{LlmError, LlmResult};
pub use lexicon::LexiconAnalyzer;
pub use providers::{CompletionClient, ProviderAdapter, ProviderSpec};
pub use retry::RetryPolicy;
pub use types::{SentimentLabel, SentimentResult};
