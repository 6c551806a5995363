use crate::analyzer::SentimentBackend;
use crate::lexicon::LexiconAnalyzer;
use crate::types::{SentimentLabel, SentimentResult};

#[test]
fn positive_text_scores_above_midpoint() {
    let result = LexiconAnalyzer::new().analyze_text("I love it! 😍");

    assert_eq!(result.sentiment, SentimentLabel::Positive);
    assert!(result.sentiment_score > 0.5);
    assert!(result.sentiment_confidence > 0.0);
}

#[test]
fn negative_text_scores_below_midpoint() {
    let result = LexiconAnalyzer::new().analyze_text("Terrible experience 😡");

    assert_eq!(result.sentiment, SentimentLabel::Negative);
    assert!(result.sentiment_score < 0.5);
}

#[test]
fn text_without_lexicon_hits_is_neutral() {
    let result = LexiconAnalyzer::new().analyze_text("The quarterly report ships tomorrow");

    assert_eq!(result.sentiment, SentimentLabel::Neutral);
    assert_eq!(result.sentiment_score, 0.5);
    assert_eq!(result.sentiment_confidence, 0.0);
}

#[test]
fn empty_text_maps_to_fallback() {
    assert_eq!(
        LexiconAnalyzer::new().analyze_text("   "),
        SentimentResult::fallback()
    );
}

#[test]
fn negation_flips_polarity() {
    let scorer = LexiconAnalyzer::new();

    let plain = scorer.analyze_text("this is good");
    let negated = scorer.analyze_text("this is not good");

    assert_eq!(plain.sentiment, SentimentLabel::Positive);
    assert_eq!(negated.sentiment, SentimentLabel::Negative);
}

#[test]
fn exclamations_intensify_the_dominant_direction() {
    let scorer = LexiconAnalyzer::new();

    let calm = scorer.analyze_text("this is great");
    let loud = scorer.analyze_text("this is great!!!");

    assert!(loud.sentiment_score > calm.sentiment_score);
}

#[test]
fn boosters_raise_intensity() {
    let scorer = LexiconAnalyzer::new();

    let plain = scorer.analyze_text("the update is good");
    let boosted = scorer.analyze_text("the update is really good");

    assert!(boosted.sentiment_score > plain.sentiment_score);
}

#[test]
fn scoring_is_deterministic() {
    let scorer = LexiconAnalyzer::new();
    let text = "Mixed feelings: great camera, awful battery";

    assert_eq!(scorer.analyze_text(text), scorer.analyze_text(text));
}

#[tokio::test]
async fn batch_interface_matches_per_text_scoring() {
    let scorer = LexiconAnalyzer::new();
    let texts = vec![
        "I love it".to_string(),
        "".to_string(),
        "I hate it".to_string(),
    ];

    let results = scorer.analyze(&texts).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].sentiment, SentimentLabel::Positive);
    assert_eq!(results[1], SentimentResult::fallback());
    assert_eq!(results[2].sentiment, SentimentLabel::Negative);
}

#[test]
fn backend_identity_reports_no_credentials() {
    let scorer = LexiconAnalyzer::new();

    assert_eq!(scorer.source(), "vader");

    let descriptor = scorer.descriptor();
    assert_eq!(descriptor.model_type, "vader");
    assert!(descriptor.provider.is_none());
    assert!(!descriptor.api_configured);
}
