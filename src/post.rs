//! Post-record text extraction.
//!
//! Incoming records are arbitrary JSON objects from upstream crawlers; the
//! analysis text is pulled out by a fixed preference order and trimmed.

use serde_json::Value;

/// Pick the first non-empty string among `fields` on `object`.
fn first_string(object: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| object.get(*f))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract the analysis text from a post record.
///
/// Preference order: a structured `content` sub-object's `text`,
/// `description` or `title`; otherwise top-level `text`, `summary` or
/// `title`; a non-object `content` value is used as-is if it is a string.
/// Returns an empty string when nothing usable is found. Always trimmed.
pub fn extract_text(post: &Value) -> String {
    match post.get("content") {
        Some(content) if content.is_object() => {
            first_string(content, &["text", "description", "title"])
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => first_string(post, &["text", "summary", "title"]),
    }
    .unwrap_or_default()
}
