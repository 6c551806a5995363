//! Shared fixtures for integration tests.

// Allow dead code in test utilities - helpers are used across different test files
#![allow(dead_code)]

use async_trait::async_trait;
use llm_sentiment::{
    CompletionClient, LlmConfig, LlmResult, LlmSentimentAnalyzer, Provider, ProviderAdapter,
    RetryPolicy,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const VALID_PAYLOAD: &str =
    r#"{"sentiment": "positive", "sentimentScore": 0.9, "confidence": 0.8}"#;

/// Config pointing a real adapter at a mock server.
pub fn mock_config(provider: Provider, base_url: &str, model: &str) -> LlmConfig {
    LlmConfig {
        provider,
        api_key: "test-key".to_string(),
        api_base: base_url.trim_end_matches('/').to_string(),
        model_name: model.to_string(),
    }
}

/// Retry policy with millisecond delays so failure tests stay fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
    }
}

/// Analyzer over the real HTTP adapter for `provider`, aimed at `base_url`.
pub fn analyzer_for(provider: Provider, base_url: &str, model: &str) -> LlmSentimentAnalyzer {
    let config = mock_config(provider, base_url, model);
    let adapter = ProviderAdapter::new(config).expect("adapter builds");
    LlmSentimentAnalyzer::with_client(
        Arc::new(adapter),
        fast_retry(),
        provider,
        model.to_string(),
    )
}

// Response envelopes as each provider's API returns them

pub fn openai_envelope(payload: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": payload}}]
    })
}

pub fn anthropic_envelope(payload: &str) -> Value {
    json!({
        "id": "msg-test",
        "content": [{"type": "text", "text": payload}]
    })
}

pub fn google_envelope(payload: &str) -> Value {
    json!({
        "candidates": [{"content": {"parts": [{"text": payload}], "role": "model"}}]
    })
}

/// Stub completion client that classifies by the text inside the prompt.
pub struct ClassifyingStub;

#[async_trait]
impl CompletionClient for ClassifyingStub {
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let (label, score) = if prompt.contains("love") {
            ("positive", 0.95)
        } else if prompt.contains("Terrible") {
            ("negative", 0.05)
        } else {
            ("neutral", 0.5)
        };
        Ok(format!(
            r#"{{"sentiment": "{label}", "sentimentScore": {score}, "confidence": 0.9}}"#
        ))
    }
}
