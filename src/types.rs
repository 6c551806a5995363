//! Canonical sentiment result types.
//!
//! A [`SentimentResult`] is always fully populated with in-range values;
//! partial results never escape the dispatch core.

use serde::{Deserialize, Serialize};

/// Three-way sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// Canonical per-text analysis result.
///
/// `sentiment_score` runs from 0.0 (negative) to 1.0 (positive);
/// `sentiment_confidence` from 0.0 (none) to 1.0 (certain). Both are
/// guaranteed in range by the response validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    pub sentiment_confidence: f64,
}

impl SentimentResult {
    /// The fixed neutral fallback returned whenever analysis cannot complete
    /// with confidence: empty input, exhausted retries, provider errors,
    /// malformed or invalid payloads.
    pub fn fallback() -> Self {
        Self {
            sentiment: SentimentLabel::Neutral,
            sentiment_score: 0.5,
            sentiment_confidence: 0.0,
        }
    }
}
