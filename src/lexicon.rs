//! Local lexicon-based sentiment backend.
//!
//! A deterministic VADER-style scorer: token valences from an embedded
//! wordlist, negation flipping, booster words, all-caps and exclamation
//! intensity, and the standard `sum / sqrt(sum^2 + 15)` compound
//! normalization. No network, no credentials, useful as a fast fallback
//! backend and in environments without provider access.

use crate::analyzer::{BackendDescriptor, SentimentBackend};
use crate::types::{SentimentLabel, SentimentResult};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Token valences on the VADER scale (-4.0 strongly negative to +4.0
/// strongly positive). Deliberately compact; unknown tokens score zero.
static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        // positive
        ("good", 1.9),
        ("great", 3.1),
        ("awesome", 3.1),
        ("amazing", 2.8),
        ("excellent", 2.7),
        ("fantastic", 2.6),
        ("wonderful", 2.7),
        ("love", 3.2),
        ("loved", 2.9),
        ("loves", 2.9),
        ("like", 1.5),
        ("liked", 1.8),
        ("best", 3.2),
        ("better", 1.9),
        ("happy", 2.7),
        ("glad", 2.0),
        ("perfect", 2.7),
        ("nice", 1.8),
        ("cool", 1.3),
        ("fun", 2.3),
        ("enjoy", 2.0),
        ("enjoyed", 2.3),
        ("beautiful", 2.9),
        ("win", 2.8),
        ("winning", 2.4),
        ("recommend", 1.6),
        ("thanks", 1.9),
        ("thank", 1.5),
        ("impressive", 2.3),
        ("solid", 1.5),
        ("smooth", 1.3),
        ("fast", 1.0),
        ("works", 1.2),
        ("yay", 2.4),
        ("wow", 2.2),
        ("😍", 2.9),
        ("❤️", 3.0),
        ("😊", 2.1),
        ("👍", 1.8),
        ("🎉", 2.5),
        // negative
        ("bad", -2.5),
        ("terrible", -3.1),
        ("horrible", -2.9),
        ("awful", -2.9),
        ("worst", -3.1),
        ("worse", -2.1),
        ("hate", -2.7),
        ("hated", -2.9),
        ("hates", -2.7),
        ("sad", -2.1),
        ("angry", -2.3),
        ("annoying", -1.9),
        ("broken", -1.9),
        ("bug", -1.5),
        ("buggy", -2.1),
        ("slow", -1.2),
        ("crash", -2.2),
        ("crashed", -2.2),
        ("fail", -2.3),
        ("failed", -2.3),
        ("failure", -2.4),
        ("useless", -2.4),
        ("waste", -2.2),
        ("scam", -2.9),
        ("disappointed", -2.2),
        ("disappointing", -2.3),
        ("poor", -2.0),
        ("problem", -1.4),
        ("problems", -1.4),
        ("ugh", -1.8),
        ("meh", -0.9),
        ("😡", -2.7),
        ("😢", -2.0),
        ("💔", -2.6),
        ("👎", -1.8),
    ])
});

/// Tokens that flip the valence of what follows them.
static NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "neither", "nor", "cannot", "cant", "dont", "wont",
    "isnt", "arent", "wasnt", "werent", "didnt", "doesnt", "couldnt", "shouldnt", "wouldnt",
];

/// Degree modifiers: added to (or subtracted from) the magnitude of the
/// next sentiment-bearing token.
static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("very", 0.293),
        ("really", 0.293),
        ("extremely", 0.293),
        ("absolutely", 0.293),
        ("totally", 0.293),
        ("so", 0.293),
        ("super", 0.293),
        ("slightly", -0.293),
        ("somewhat", -0.293),
        ("kinda", -0.293),
        ("barely", -0.293),
        ("hardly", -0.293),
    ])
});

const NEGATION_DAMPENER: f64 = -0.74;
const CAPS_BOOST: f64 = 1.25;
const EXCLAMATION_BOOST: f64 = 0.292;
const NORMALIZATION_ALPHA: f64 = 15.0;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Strip leading/trailing ASCII punctuation, preserving emoji and inner
/// apostrophes ("don't" -> "don't").
fn clean_token(token: &str) -> String {
    token
        .trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
        .replace('\'', "")
}

fn is_all_caps(token: &str) -> bool {
    token.len() > 1
        && token.chars().any(|c| c.is_alphabetic())
        && token.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

/// VADER-style compound score in [-1.0, 1.0] for a text.
fn compound_score(text: &str) -> f64 {
    let tokens: Vec<String> = text.split_whitespace().map(clean_token).collect();
    // Caps only carry intensity when the writer is being selective about them
    let all_caps_text = tokens.iter().all(|t| is_all_caps(t) || t.is_empty());

    let mut sum = 0.0;
    for (i, token) in tokens.iter().enumerate() {
        let lower = token.to_lowercase();
        let Some(&base) = LEXICON.get(lower.as_str()) else {
            continue;
        };

        let mut valence = base;

        if is_all_caps(token) && !all_caps_text {
            valence *= CAPS_BOOST;
        }

        // Look back up to three tokens for boosters and negations
        let window_start = i.saturating_sub(3);
        for prior in tokens[window_start..i].iter().rev() {
            let prior = prior.to_lowercase();
            if let Some(&boost) = BOOSTERS.get(prior.as_str()) {
                valence += boost * valence.signum();
            }
            if NEGATIONS.contains(&prior.as_str()) {
                valence *= NEGATION_DAMPENER;
                break;
            }
        }

        sum += valence;
    }

    // Repeated exclamation amplifies the dominant direction, capped at 4
    let exclamations = text.matches('!').count().min(4) as f64;
    if sum > 0.0 {
        sum += exclamations * EXCLAMATION_BOOST;
    } else if sum < 0.0 {
        sum -= exclamations * EXCLAMATION_BOOST;
    }

    sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()
}

/// Lexicon-backed sentiment analyzer. Stateless and infallible.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score one text. Empty or whitespace-only input maps to the fallback.
    pub fn analyze_text(&self, text: &str) -> SentimentResult {
        let text = text.trim();
        if text.is_empty() {
            return SentimentResult::fallback();
        }

        let compound = compound_score(text);
        let sentiment = if compound >= 0.05 {
            SentimentLabel::Positive
        } else if compound <= -0.05 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentResult {
            sentiment,
            sentiment_score: round3((compound + 1.0) / 2.0),
            sentiment_confidence: round3(compound.abs()),
        }
    }
}

#[async_trait]
impl SentimentBackend for LexiconAnalyzer {
    async fn analyze(&self, texts: &[String]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.analyze_text(t)).collect()
    }

    fn source(&self) -> String {
        "vader".to_string()
    }

    fn descriptor(&self) -> BackendDescriptor {
        BackendDescriptor {
            model_type: "vader",
            provider: None,
            model_name: None,
            api_configured: false,
        }
    }
}
