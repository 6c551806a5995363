//! Canonical sentiment prompt construction.
//!
//! One template is sent to every provider. It embeds the text, the analysis
//! instructions and the exact JSON schema the response validator expects
//! back, so prompt and validator stay in lockstep.

/// Build the sentiment analysis prompt for a single text.
///
/// Deterministic: the same input always produces the same prompt.
pub fn build_sentiment_prompt(text: &str) -> String {
    format!(
        r#"Analyze the sentiment of the social media text delimited by triple backticks.
Respond ONLY with a raw JSON object. Do not include markdown formatting, explanations, or any text outside the JSON.

### Text to analyze:
```{text}```

### Instructions:
1. **Linguistic Context:** Interpret emojis (e.g., 💀 can mean 'dead' or 'funny'), slang, and code-mixed language (e.g., Hindi-English).
2. **Emotional Intensity:** ALL CAPS and multiple punctuation (!!!) should shift the sentimentScore further toward 0.0 or 1.0.
3. **Sarcasm/Irony:** If the text uses positive words to convey a negative critique, classify as "negative".
4. **Mixed Sentiment:** If both positive and negative elements exist, the `sentimentScore` should reflect the dominant emotion, but `confidence` should be lowered.

### Response Schema:
{{
  "sentiment": "positive" | "neutral" | "negative",
  "sentimentScore": float (0.0 to 1.0),
  "confidence": float (0.0 to 1.0),
  "reasoning": "A 1-sentence explanation of the detected tone"
}}

JSON Response:"#
    )
}

/// System message sent to providers whose wire format carries one.
pub const SYSTEM_MESSAGE: &str =
    "You are a sentiment analysis expert. Always respond with valid JSON only.";
