//! Provider selection and configuration resolution.
//!
//! Configuration is resolved from environment variables exactly once at
//! startup and held for the process lifetime. Resolution order for every
//! field is: provider-specific variable, then generic `LLM_*` fallback, then
//! a hardcoded default (base URL and model name only; an API key is never
//! defaulted).

use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use serde::Serialize;
use std::str::FromStr;

/// Supported LLM providers.
///
/// `Generic` targets any OpenAI-compatible endpoint and is configured purely
/// through the `LLM_*` variables. An unrecognized provider name is a fatal
/// configuration error at startup, not at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
    DeepSeek,
    Generic,
}

impl Provider {
    /// Environment variable prefix for provider-specific overrides.
    fn env_prefix(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("OPENAI"),
            Provider::Anthropic => Some("ANTHROPIC"),
            Provider::Google => Some("GOOGLE"),
            Provider::DeepSeek => Some("DEEPSEEK"),
            Provider::Generic => None,
        }
    }

    /// Default API base URL, if the provider has a well-known one.
    fn default_base_url(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("https://api.openai.com/v1"),
            Provider::Anthropic => Some("https://api.anthropic.com/v1"),
            Provider::Google => Some("https://generativelanguage.googleapis.com/v1beta"),
            Provider::DeepSeek => Some("https://api.deepseek.com/v1"),
            Provider::Generic => None,
        }
    }

    /// Default model name, if the provider has a sensible one.
    fn default_model(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("gpt-3.5-turbo"),
            Provider::Anthropic => Some("claude-3-haiku-20240307"),
            Provider::Google => Some("gemini-2.5-flash-lite"),
            Provider::DeepSeek => Some("deepseek-chat"),
            Provider::Generic => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::DeepSeek => "deepseek",
            Provider::Generic => "generic",
        }
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "google" => Ok(Provider::Google),
            "deepseek" => Ok(Provider::DeepSeek),
            "generic" => Ok(Provider::Generic),
            other => Err(LlmError::configuration_error(format!(
                "Unsupported provider: {other}. Supported providers: openai, anthropic, google, deepseek, generic"
            ))),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved LLM configuration, valid for the process lifetime.
///
/// Invariant: `api_key` and `model_name` are non-empty once constructed.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: String,
    pub api_base: String,
    pub model_name: String,
}

/// Read an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl LlmConfig {
    /// Resolve configuration from the environment.
    ///
    /// The provider is selected by `LLM_PROVIDER` (default `openai`).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the provider name is not
    /// recognized, or if no usable API key, base URL or model name can be
    /// resolved for it.
    pub fn from_env() -> LlmResult<Self> {
        let provider_name = env_var("LLM_PROVIDER").unwrap_or_else(|| "openai".to_string());
        let provider = Provider::from_str(&provider_name)?;
        Self::resolve(provider)
    }

    /// Resolve configuration for a specific provider.
    pub fn resolve(provider: Provider) -> LlmResult<Self> {
        let prefix = provider.env_prefix();

        let api_key = prefix
            .and_then(|p| env_var(&format!("{p}_API_KEY")))
            .or_else(|| env_var("LLM_API_KEY"))
            .ok_or_else(|| {
                LlmError::configuration_error(format!(
                    "API key not found for provider '{provider}'. Set LLM_API_KEY or the \
                     provider-specific key (e.g. OPENAI_API_KEY)"
                ))
            })?;

        let api_base = prefix
            .and_then(|p| env_var(&format!("{p}_API_BASE")))
            .or_else(|| env_var("LLM_BASE_URL"))
            .or_else(|| provider.default_base_url().map(str::to_string))
            .ok_or_else(|| {
                LlmError::configuration_error(
                    "Base URL not found for provider 'generic'. Set LLM_BASE_URL",
                )
            })?;
        // A trailing slash would double up when the endpoint path is appended
        let api_base = api_base.trim_end_matches('/').to_string();

        let model_name = prefix
            .and_then(|p| env_var(&format!("{p}_MODEL")))
            .or_else(|| env_var("LLM_MODEL_NAME"))
            .or_else(|| provider.default_model().map(str::to_string))
            .ok_or_else(|| {
                LlmError::configuration_error(format!(
                    "Model name not found for provider '{provider}'. Set LLM_MODEL_NAME or the \
                     provider-specific model (e.g. OPENAI_MODEL)"
                ))
            })?;

        log_debug!(
            provider = %provider,
            api_base = %api_base,
            model = %model_name,
            has_api_key = !api_key.is_empty(),
            "LLM configuration resolved"
        );

        Ok(Self {
            provider,
            api_key,
            api_base,
            model_name,
        })
    }
}
