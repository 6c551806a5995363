//! LLM provider adapters.
//!
//! Providers are modelled as data rather than near-duplicated methods: each
//! [`Provider`](crate::config::Provider) maps to a [`ProviderSpec`] holding
//! its endpoint path template, auth scheme, request body shape and the JSON
//! pointer used to extract the model's raw answer from the response
//! envelope. One generic [`ProviderAdapter`] consumes the table.
//!
//! ```text
//! ProviderSpec table
//!        |
//! ProviderAdapter::complete()  <- exactly one HTTP request, no retries
//!        |
//! CompletionClient trait       <- seam for the scheduler and for test stubs
//! ```
//!
//! Each spec pins an `api_version`, so an upstream envelope change (the
//! extraction pointers differ in nesting depth per vendor) is a one-line
//! table edit.

pub mod types;

use crate::config::{LlmConfig, Provider};
use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use crate::prompt::SYSTEM_MESSAGE;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use types::{
    AnthropicRequest, ChatMessage, GoogleContent, GoogleGenerationConfig, GooglePart,
    GoogleRequest, OpenAiChatRequest, OpenAiResponseFormat,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_KEEPALIVE_PER_HOST: usize = 20;
const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

/// Sampling temperature for classification; low to keep answers stable.
const TEMPERATURE: f64 = 0.1;
/// Anthropic requires an explicit output cap; the JSON payload is tiny.
const ANTHROPIC_MAX_TOKENS: u32 = 200;

/// How the API key is attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`.
    Bearer,
    /// `x-api-key: <key>` plus a pinned `anthropic-version` header.
    AnthropicHeaders,
    /// `?key=<key>` appended to the URL.
    QueryKey,
}

/// Which request body the endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// Chat message array with a system message and `response_format`.
    OpenAiChat,
    /// Anthropic messages array, user message only.
    AnthropicMessages,
    /// Google `contents`/`parts` blob with `generationConfig`.
    GoogleGenerateContent,
}

/// Per-provider variation points, captured as data.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSpec {
    /// Path appended to the configured base URL. `{model}` is substituted
    /// with the (normalized) model identifier.
    pub endpoint_path: &'static str,
    pub auth: AuthScheme,
    pub body: BodyShape,
    /// JSON pointer to the raw answer text inside the response envelope.
    pub answer_pointer: &'static str,
    /// Upstream API revision this spec was written against.
    pub api_version: &'static str,
}

impl Provider {
    /// The wire-level spec for this provider.
    pub fn spec(self) -> ProviderSpec {
        match self {
            Provider::OpenAi => ProviderSpec {
                endpoint_path: "/chat/completions",
                auth: AuthScheme::Bearer,
                body: BodyShape::OpenAiChat,
                answer_pointer: "/choices/0/message/content",
                api_version: "v1",
            },
            Provider::Anthropic => ProviderSpec {
                endpoint_path: "/messages",
                auth: AuthScheme::AnthropicHeaders,
                body: BodyShape::AnthropicMessages,
                answer_pointer: "/content/0/text",
                api_version: "2023-06-01",
            },
            Provider::Google => ProviderSpec {
                endpoint_path: "/{model}:generateContent",
                auth: AuthScheme::QueryKey,
                body: BodyShape::GoogleGenerateContent,
                answer_pointer: "/candidates/0/content/parts/0/text",
                api_version: "v1beta",
            },
            // DeepSeek and generic endpoints are OpenAI-compatible
            Provider::DeepSeek | Provider::Generic => ProviderSpec {
                endpoint_path: "/chat/completions",
                auth: AuthScheme::Bearer,
                body: BodyShape::OpenAiChat,
                answer_pointer: "/choices/0/message/content",
                api_version: "v1",
            },
        }
    }
}

/// The seam between the dispatch core and a provider's completion endpoint.
///
/// `complete` sends one prompt and returns the model's raw answer text.
/// Implemented by [`ProviderAdapter`] for real providers and by stubs in
/// tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> LlmResult<String>;
}

/// Generic HTTP adapter driven by a [`ProviderSpec`].
///
/// Performs exactly one outbound request per `complete` call; retries live
/// in the layer above.
#[derive(Debug)]
pub struct ProviderAdapter {
    http: reqwest::Client,
    config: LlmConfig,
    spec: ProviderSpec,
}

impl ProviderAdapter {
    /// Create an adapter with the process-wide pooled HTTP client settings.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the HTTP client cannot be
    /// built.
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(MAX_KEEPALIVE_PER_HOST)
            .pool_idle_timeout(KEEPALIVE_EXPIRY)
            .build()
            .map_err(|e| {
                LlmError::configuration_error(format!("Failed to build HTTP client: {e}"))
            })?;

        let spec = config.provider.spec();
        log_debug!(
            provider = %config.provider,
            model = %config.model_name,
            api_version = spec.api_version,
            "Provider adapter initialized"
        );

        Ok(Self { http, config, spec })
    }

    /// The model identifier as it appears in the endpoint path.
    ///
    /// Google expects a `models/` prefix; other providers take the name
    /// verbatim in the body, not the path.
    fn path_model_id(&self) -> String {
        let model = &self.config.model_name;
        if model.starts_with("models/") {
            model.clone()
        } else {
            format!("models/{model}")
        }
    }

    fn request_url(&self) -> String {
        let path = self
            .spec
            .endpoint_path
            .replace("{model}", &self.path_model_id());
        let mut url = format!("{}{}", self.config.api_base, path);
        if self.spec.auth == AuthScheme::QueryKey {
            url.push_str(&format!("?key={}", self.config.api_key));
        }
        url
    }

    /// Attach the provider-shaped JSON body to the request.
    fn with_body(&self, request: reqwest::RequestBuilder, prompt: &str) -> reqwest::RequestBuilder {
        match self.spec.body {
            BodyShape::OpenAiChat => request.json(&OpenAiChatRequest {
                model: self.config.model_name.clone(),
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: SYSTEM_MESSAGE.to_string(),
                    },
                    ChatMessage {
                        role: "user",
                        content: prompt.to_string(),
                    },
                ],
                temperature: TEMPERATURE,
                response_format: OpenAiResponseFormat {
                    format_type: "json_object",
                },
            }),
            BodyShape::AnthropicMessages => request.json(&AnthropicRequest {
                model: self.config.model_name.clone(),
                max_tokens: ANTHROPIC_MAX_TOKENS,
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                }],
            }),
            BodyShape::GoogleGenerateContent => request.json(&GoogleRequest {
                contents: vec![GoogleContent {
                    parts: vec![GooglePart {
                        text: prompt.to_string(),
                    }],
                }],
                generation_config: GoogleGenerationConfig {
                    temperature: TEMPERATURE,
                    response_mime_type: "application/json",
                },
            }),
        }
    }

    fn map_send_error(e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::transport("Request timed out", Some(Box::new(e)))
        } else if e.is_connect() {
            LlmError::transport("Connection failed", Some(Box::new(e)))
        } else {
            LlmError::transport(format!("Request failed: {e}"), Some(Box::new(e)))
        }
    }
}

#[async_trait]
impl CompletionClient for ProviderAdapter {
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let url = self.request_url();

        let mut request = self.with_body(self.http.post(&url), prompt);
        match self.spec.auth {
            AuthScheme::Bearer => {
                request = request.bearer_auth(&self.config.api_key);
            }
            AuthScheme::AnthropicHeaders => {
                request = request
                    .header("x-api-key", &self.config.api_key)
                    .header("anthropic-version", self.spec.api_version);
            }
            AuthScheme::QueryKey => {} // key already in the URL
        }

        let response = request.send().await.map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::http_status(status.as_u16(), body));
        }

        let envelope: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                LlmError::malformed_response(format!("Response body is not JSON: {e}"))
            } else {
                Self::map_send_error(e)
            }
        })?;

        let answer = envelope
            .pointer(self.spec.answer_pointer)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                LlmError::malformed_response(format!(
                    "No answer text at {} in {} response (api version {})",
                    self.spec.answer_pointer, self.config.provider, self.spec.api_version
                ))
            })?;

        Ok(answer.to_string())
    }
}
