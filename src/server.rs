//! HTTP boundary layer — Axum routes over a [`SentimentBackend`].
//!
//! Thin by design: schema shaping, CORS and the batch wall-clock timeout
//! live here; everything interesting happens behind the backend trait.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tower_http::cors::CorsLayer;

use crate::analyzer::SentimentBackend;
use crate::logging::{log_error, log_info};
use crate::post::extract_text;
use crate::types::SentimentResult;

/// Overall wall-clock budget for one batch. An elapsed timeout maps every
/// unresolved text to the fallback rather than hanging the caller.
const BATCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SentimentBackend>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub posts: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub results: Vec<Value>,
}

/// Build the service router.
pub fn router(backend: Arc<dyn SentimentBackend>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .layer(CorsLayer::permissive())
        .with_state(AppState { backend })
}

/// Serve until the listener fails (blocks).
pub async fn run(backend: Arc<dyn SentimentBackend>, bind: SocketAddr) -> anyhow::Result<()> {
    let app = router(backend);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    log_info!(bind = %bind, "Sentiment service listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ── HTTP Handlers ──

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let descriptor = state.backend.descriptor();
    let mut health = serde_json::json!({
        "status": "healthy",
        "model_loaded": true,
    });
    if let (Value::Object(health), Value::Object(fields)) = (
        &mut health,
        serde_json::to_value(&descriptor).unwrap_or_default(),
    ) {
        health.extend(fields);
    }
    Json(health)
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    log_info!(posts = request.posts.len(), "Sentiment analysis request");

    if request.posts.is_empty() {
        return Json(AnalyzeResponse {
            results: Vec::new(),
        });
    }

    let texts: Vec<String> = request.posts.iter().map(extract_text).collect();

    let predictions = match tokio::time::timeout(BATCH_TIMEOUT, state.backend.analyze(&texts)).await
    {
        Ok(predictions) => predictions,
        Err(_elapsed) => {
            log_error!(
                timeout_secs = BATCH_TIMEOUT.as_secs(),
                posts = texts.len(),
                "Batch analysis timed out, returning fallback results"
            );
            vec![SentimentResult::fallback(); texts.len()]
        }
    };

    // One timestamp for the whole batch
    let analyzed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let source = state.backend.source();

    let results = request
        .posts
        .iter()
        .zip(predictions)
        .enumerate()
        .map(|(index, (post, prediction))| {
            annotate_post(post, &prediction, &analyzed_at, &source, index)
        })
        .collect();

    Json(AnalyzeResponse { results })
}

/// Merge the sentiment fields into the original record, preserving all of
/// its other fields. Records lacking both `_id` and `id` get a synthetic
/// `temp_<index>` id.
fn annotate_post(
    post: &Value,
    prediction: &SentimentResult,
    analyzed_at: &str,
    source: &str,
    index: usize,
) -> Value {
    let mut record = match post {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };

    record.insert(
        "sentiment".to_string(),
        Value::String(prediction.sentiment.to_string()),
    );
    record.insert(
        "sentimentScore".to_string(),
        serde_json::json!(prediction.sentiment_score),
    );
    record.insert(
        "sentimentConfidence".to_string(),
        serde_json::json!(prediction.sentiment_confidence),
    );
    record.insert(
        "sentimentAnalyzedAt".to_string(),
        Value::String(analyzed_at.to_string()),
    );
    record.insert("sentimentSource".to_string(), Value::String(source.to_string()));

    let has_id = record.get("_id").is_some_and(|v| !v.is_null())
        || record.get("id").is_some_and(|v| !v.is_null());
    if !has_id {
        record.insert("_id".to_string(), Value::String(format!("temp_{index}")));
    }

    Value::Object(record)
}
