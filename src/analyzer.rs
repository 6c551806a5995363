//! Dispatch core: total per-text analysis and the batch scheduler.
//!
//! [`LlmSentimentAnalyzer`] owns the resolved provider configuration for the
//! process lifetime and exposes the single `analyze` entry point used by the
//! boundary layer. Per-text analysis is total: every failure class is
//! absorbed into the neutral fallback, so a batch never raises to its
//! caller. Batches fan out under a counting semaphore and results are
//! written back at their original input index regardless of completion
//! order.

use crate::config::{LlmConfig, Provider};
use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_info, log_warn};
use crate::prompt::build_sentiment_prompt;
use crate::providers::{CompletionClient, ProviderAdapter};
use crate::retry::RetryPolicy;
use crate::types::SentimentResult;
use crate::validate::validate_sentiment;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Admission limit: at most this many provider calls in flight per batch.
pub const MAX_CONCURRENT_ANALYSES: usize = 10;

/// What the health endpoint reports about the active backend.
///
/// Never carries the credential value itself, only whether one is present.
#[derive(Debug, Clone, Serialize)]
pub struct BackendDescriptor {
    pub model_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    pub api_configured: bool,
}

/// An interchangeable sentiment backend.
///
/// Implemented by [`LlmSentimentAnalyzer`] and by the local lexicon scorer;
/// the boundary layer only sees this trait.
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    /// Analyze a batch of texts. Same length and order as the input, always.
    async fn analyze(&self, texts: &[String]) -> Vec<SentimentResult>;

    /// Value of the `sentimentSource` field, e.g. `llm_openai` or `vader`.
    fn source(&self) -> String;

    /// Backend identity for the health report.
    fn descriptor(&self) -> BackendDescriptor;
}

/// LLM-backed sentiment analyzer.
#[derive(Clone)]
pub struct LlmSentimentAnalyzer {
    client: Arc<dyn CompletionClient>,
    retry: RetryPolicy,
    provider: Provider,
    model_name: String,
}

impl LlmSentimentAnalyzer {
    /// Build an analyzer over the real provider adapter.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the HTTP client cannot be
    /// built.
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let provider = config.provider;
        let model_name = config.model_name.clone();
        let adapter = ProviderAdapter::new(config)?;

        log_info!(
            provider = %provider,
            model = %model_name,
            "LLM sentiment analyzer initialized"
        );

        Ok(Self::with_client(
            Arc::new(adapter),
            RetryPolicy::default(),
            provider,
            model_name,
        ))
    }

    /// Build an analyzer over any completion client. This is the seam stub
    /// clients plug into.
    pub fn with_client(
        client: Arc<dyn CompletionClient>,
        retry: RetryPolicy,
        provider: Provider,
        model_name: String,
    ) -> Self {
        Self {
            client,
            retry,
            provider,
            model_name,
        }
    }

    /// Analyze one text. Total: always returns a result, never an error.
    ///
    /// Empty or whitespace-only input maps directly to the fallback without
    /// a network call. Every failure along the
    /// prompt -> retry(complete) -> validate chain is logged with its
    /// taxonomy class and absorbed into the fallback.
    pub async fn analyze_text(&self, text: &str) -> SentimentResult {
        let text = text.trim();
        if text.is_empty() {
            return SentimentResult::fallback();
        }

        let prompt = build_sentiment_prompt(text);
        let outcome = self
            .retry
            .run(|| self.client.complete(&prompt))
            .await
            .and_then(|raw| validate_sentiment(&raw));

        match outcome {
            Ok(result) => {
                log_debug!(
                    sentiment = %result.sentiment,
                    score = result.sentiment_score,
                    confidence = result.sentiment_confidence,
                    "Sentiment analysis complete"
                );
                result
            }
            Err(error) => {
                log_warn!(
                    error_type = error.error_type(),
                    error = %error,
                    "Falling back to neutral sentiment"
                );
                SentimentResult::fallback()
            }
        }
    }

    /// Analyze a batch of texts with bounded parallelism.
    ///
    /// Empty texts resolve synchronously without consuming a concurrency
    /// slot. The remaining texts run under a semaphore of
    /// [`MAX_CONCURRENT_ANALYSES`] permits; every index is populated even if
    /// a task fails to join, so the output length always equals the input
    /// length.
    pub async fn analyze_batch(&self, texts: &[String]) -> Vec<SentimentResult> {
        if texts.is_empty() {
            return Vec::new();
        }

        // Pre-filled with fallbacks: empty slots stay that way, and a
        // catastrophic join failure leaves the index populated.
        let mut results = vec![SentimentResult::fallback(); texts.len()];

        let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_ANALYSES));
        let mut handles = Vec::with_capacity(texts.len());

        for text in texts {
            if text.trim().is_empty() {
                handles.push(None);
                continue;
            }

            let this = self.clone();
            let permits = Arc::clone(&permits);
            let text = text.clone();
            handles.push(Some(tokio::spawn(async move {
                match permits.acquire().await {
                    Ok(_permit) => this.analyze_text(&text).await,
                    Err(_closed) => {
                        LlmError::scheduler("Admission semaphore closed during batch");
                        SentimentResult::fallback()
                    }
                }
            })));
        }

        for (index, handle) in handles.into_iter().enumerate() {
            let Some(handle) = handle else { continue };
            match handle.await {
                Ok(result) => results[index] = result,
                Err(join_error) => {
                    // Constructor logs; the slot keeps its fallback value
                    LlmError::scheduler(format!("Analysis task failed to join: {join_error}"));
                }
            }
        }

        results
    }
}

#[async_trait]
impl SentimentBackend for LlmSentimentAnalyzer {
    async fn analyze(&self, texts: &[String]) -> Vec<SentimentResult> {
        self.analyze_batch(texts).await
    }

    fn source(&self) -> String {
        format!("llm_{}", self.provider)
    }

    fn descriptor(&self) -> BackendDescriptor {
        BackendDescriptor {
            model_type: "llm",
            provider: Some(self.provider),
            model_name: Some(self.model_name.clone()),
            api_configured: true,
        }
    }
}
