//! Structured-response validation.
//!
//! The model is instructed to answer with a raw JSON object; this module is
//! the gate that decides whether that answer becomes a [`SentimentResult`].
//! Violations are typed errors, never silent coercion: a score of 1.5 is a
//! validation failure, not a clamp to 1.0.

use crate::error::{LlmError, LlmResult};
use crate::types::{SentimentLabel, SentimentResult};
use serde::Deserialize;

/// The payload shape the prompt asks every provider's model to produce.
///
/// Extra fields (the prompt also requests a `reasoning` sentence) are
/// ignored.
#[derive(Debug, Deserialize)]
struct RawSentimentPayload {
    sentiment: SentimentLabel,
    #[serde(rename = "sentimentScore")]
    sentiment_score: f64,
    confidence: f64,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn check_range(name: &str, value: f64) -> LlmResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(LlmError::validation(format!(
            "{name} out of range: {value} (expected 0.0..=1.0)"
        )));
    }
    Ok(())
}

/// Parse and validate a raw model answer into a canonical result.
///
/// Requires `sentiment` to be exactly one of the three literals and both
/// `sentimentScore` and `confidence` to be numbers in [0.0, 1.0] inclusive.
/// On success, scores are rounded to 3 decimal digits and `confidence` is
/// renamed to `sentimentConfidence` in the canonical result.
///
/// # Errors
///
/// Returns [`LlmError::Validation`] for unparsable JSON, missing fields,
/// unknown sentiment literals or out-of-range values.
pub fn validate_sentiment(raw: &str) -> LlmResult<SentimentResult> {
    let payload: RawSentimentPayload = serde_json::from_str(raw)
        .map_err(|e| LlmError::validation(format!("Invalid sentiment payload: {e}")))?;

    check_range("sentimentScore", payload.sentiment_score)?;
    check_range("confidence", payload.confidence)?;

    Ok(SentimentResult {
        sentiment: payload.sentiment,
        sentiment_score: round3(payload.sentiment_score),
        sentiment_confidence: round3(payload.confidence),
    })
}
