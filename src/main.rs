use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use llm_sentiment::analyzer::{LlmSentimentAnalyzer, SentimentBackend};
use llm_sentiment::config::LlmConfig;
use llm_sentiment::lexicon::LexiconAnalyzer;
use llm_sentiment::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration is resolved once here; a missing key or model name is
    // fatal and the process never becomes ready.
    let backend_kind =
        std::env::var("SENTIMENT_BACKEND").unwrap_or_else(|_| "llm".to_string());
    let backend: Arc<dyn SentimentBackend> = match backend_kind.as_str() {
        "llm" => {
            let config = LlmConfig::from_env().context("failed to resolve LLM configuration")?;
            Arc::new(LlmSentimentAnalyzer::new(config)?)
        }
        "lexicon" | "vader" => Arc::new(LexiconAnalyzer::new()),
        other => anyhow::bail!(
            "Unsupported SENTIMENT_BACKEND: {other}. Supported backends: llm, lexicon"
        ),
    };

    let descriptor = backend.descriptor();
    info!(
        backend = descriptor.model_type,
        provider = descriptor.provider.map(|p| p.as_str()),
        model = descriptor.model_name.as_deref(),
        api_configured = descriptor.api_configured,
        "Sentiment backend ready"
    );

    let port: u16 = std::env::var("PORT")
        .ok()
        .map(|p| u16::from_str(&p))
        .transpose()
        .context("PORT must be a number")?
        .unwrap_or(8000);
    let bind = SocketAddr::from(([0, 0, 0, 0], port));

    server::run(backend, bind).await
}
