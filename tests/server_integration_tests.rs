//! End-to-end tests over the live HTTP boundary.
//!
//! A real axum server is bound to an ephemeral port and exercised with a
//! plain reqwest client, the way the upstream backend talks to the service.

mod common;

use common::{analyzer_for, fast_retry, openai_envelope, ClassifyingStub};
use llm_sentiment::{LexiconAnalyzer, LlmSentimentAnalyzer, Provider, SentimentBackend};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_server(backend: Arc<dyn SentimentBackend>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = llm_sentiment::server::router(backend);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });
    format!("http://{addr}")
}

fn llm_stub_backend() -> Arc<dyn SentimentBackend> {
    Arc::new(LlmSentimentAnalyzer::with_client(
        Arc::new(ClassifyingStub),
        fast_retry(),
        Provider::OpenAi,
        "gpt-test".to_string(),
    ))
}

#[tokio::test]
async fn analyze_classifies_posts_and_shares_one_timestamp() {
    let base = spawn_server(llm_stub_backend()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({
            "posts": [
                {"content": {"text": "I love it! 😍"}},
                {"content": {"text": ""}},
                {"content": {"text": "Terrible experience 😡"}}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    let sentiments: Vec<&str> = results
        .iter()
        .map(|r| r["sentiment"].as_str().unwrap())
        .collect();
    assert_eq!(sentiments, vec!["positive", "neutral", "negative"]);

    // The empty post is the fixed fallback
    assert_eq!(results[1]["sentimentScore"], 0.5);
    assert_eq!(results[1]["sentimentConfidence"], 0.0);

    // One timestamp for the whole batch
    let stamp = results[0]["sentimentAnalyzedAt"].as_str().unwrap();
    assert!(results
        .iter()
        .all(|r| r["sentimentAnalyzedAt"].as_str().unwrap() == stamp));

    for (index, result) in results.iter().enumerate() {
        assert_eq!(result["sentimentSource"], "llm_openai");
        assert_eq!(
            result["_id"],
            format!("temp_{index}"),
            "records without ids get synthetic ones"
        );
    }
}

#[tokio::test]
async fn original_fields_and_ids_are_preserved() {
    let base = spawn_server(llm_stub_backend()).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({
            "posts": [
                {"id": "abc-1", "platform": "mastodon", "keyword": "rust",
                 "content": {"text": "I love it"}}
            ]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let result = &body["results"][0];
    assert_eq!(result["id"], "abc-1");
    assert_eq!(result["platform"], "mastodon");
    assert_eq!(result["keyword"], "rust");
    assert_eq!(result["sentiment"], "positive");
    assert!(result.get("_id").is_none(), "no synthetic id when one exists");
}

#[tokio::test]
async fn empty_posts_array_returns_empty_results() {
    let base = spawn_server(llm_stub_backend()).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({"posts": []}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn health_reports_llm_backend_without_leaking_the_key() {
    let base = spawn_server(llm_stub_backend()).await;

    let body: Value = reqwest::Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model_type"], "llm");
    assert_eq!(body["provider"], "openai");
    assert_eq!(body["model_name"], "gpt-test");
    assert_eq!(body["api_configured"], true);
    assert!(
        body.as_object().unwrap().values().all(|v| v != "test-key"),
        "credential value must never appear in health output"
    );
}

#[tokio::test]
async fn lexicon_backend_serves_the_same_boundary() {
    let base = spawn_server(Arc::new(LexiconAnalyzer::new())).await;

    let health: Value = reqwest::Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["model_type"], "vader");
    assert_eq!(health["api_configured"], false);

    let body: Value = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({"posts": [{"text": "I love this awesome thing"}]}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let result = &body["results"][0];
    assert_eq!(result["sentiment"], "positive");
    assert_eq!(result["sentimentSource"], "vader");
}

#[tokio::test]
async fn full_stack_through_a_mocked_provider() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_envelope(
            r#"{"sentiment": "negative", "sentimentScore": 0.08, "confidence": 0.93}"#,
        )))
        .expect(1)
        .mount(&provider)
        .await;

    let analyzer = analyzer_for(Provider::OpenAi, &provider.uri(), "gpt-test");
    let base = spawn_server(Arc::new(analyzer)).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({"posts": [{"content": {"text": "Terrible experience 😡"}}]}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let result = &body["results"][0];
    assert_eq!(result["sentiment"], "negative");
    assert_eq!(result["sentimentScore"], 0.08);
    assert_eq!(result["sentimentConfidence"], 0.93);
    assert_eq!(result["sentimentSource"], "llm_openai");
}
