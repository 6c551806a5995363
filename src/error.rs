//! Error types for sentiment analysis operations.
//!
//! This module provides structured error handling for the LLM dispatch core,
//! mirroring the failure taxonomy the service is built around:
//!
//! - Configuration errors (missing API keys or model names at startup)
//! - Transport errors (timeouts, connection failures) - the only retryable class
//! - HTTP status errors (non-2xx responses from a provider)
//! - Malformed responses (provider envelope did not match the expected shape)
//! - Validation errors (model answered, but not with a valid sentiment payload)
//! - Scheduler errors (the batch executor itself failed)
//!
//! Every constructor method logs a structured event with an `error_type` field
//! naming the taxonomy class, so fallback rates are diagnosable by cause.
//!
//! # Result Type
//!
//! Use [`LlmResult<T>`] as a convenient alias for `Result<T, LlmError>`.

use crate::logging::{log_error, log_warn};
use thiserror::Error;

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`LlmError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller or operator made a mistake they can fix (bad provider name,
    /// missing credentials). Fatal at startup, never retried.
    Configuration,

    /// The network or the provider's transport had an issue. Retry with
    /// exponential backoff.
    Transient,

    /// The provider answered, but unusably (HTTP error status, unexpected
    /// envelope, invalid sentiment payload). Not retried; absorbed into the
    /// neutral fallback.
    Application,

    /// Something went wrong in the dispatch machinery itself.
    Internal,
}

/// Convenient result type for LLM dispatch operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while analyzing text through an LLM provider.
///
/// Each variant can be categorized via [`category()`](Self::category),
/// checked for retryability via [`is_retryable()`](Self::is_retryable) and
/// tagged for structured logging via [`error_type()`](Self::error_type).
///
/// | Variant | Category | Retryable |
/// |---------|----------|-----------|
/// | `ConfigurationError` | Configuration | No |
/// | `Transport` | Transient | Yes |
/// | `HttpStatus` | Application | No |
/// | `MalformedResponse` | Application | No |
/// | `Validation` | Application | No |
/// | `Scheduler` | Internal | No |
#[derive(Error, Debug)]
pub enum LlmError {
    /// Provider configuration is invalid or incomplete.
    ///
    /// Raised once at startup resolution time. The process must not become
    /// ready when this occurs.
    #[error("Provider configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request never completed: timeout, DNS failure, connection
    /// refused or reset.
    ///
    /// This is the only class the retry policy acts on.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider responded with a non-2xx status.
    ///
    /// Application-level failures are never retried; a 401 or 429 retried
    /// blindly would only burn quota.
    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned by the provider.
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// The provider's response envelope did not contain the expected answer
    /// text at the documented JSON path.
    ///
    /// Usually indicates an upstream API change; check the provider table's
    /// pinned `api_version`.
    #[error("Malformed provider response: {message}")]
    MalformedResponse {
        /// Details about the envelope mismatch.
        message: String,
    },

    /// The extracted answer was not a valid sentiment payload.
    ///
    /// Missing field, unknown sentiment literal, out-of-range score or
    /// unparsable JSON. Values are never coerced or clamped.
    #[error("Sentiment validation failed: {message}")]
    Validation {
        /// Details about the validation failure.
        message: String,
    },

    /// The batch scheduler could not run or complete an analysis task.
    #[error("Scheduler error: {message}")]
    Scheduler {
        /// Details about the scheduling failure.
        message: String,
    },
}

impl LlmError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Configuration,
            Self::Transport { .. } => ErrorCategory::Transient,
            Self::HttpStatus { .. } => ErrorCategory::Application,
            Self::MalformedResponse { .. } => ErrorCategory::Application,
            Self::Validation { .. } => ErrorCategory::Application,
            Self::Scheduler { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error is transient and should trigger a retry.
    ///
    /// Only transport failures qualify. HTTP status errors and malformed or
    /// invalid payloads propagate immediately to the fallback policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Stable taxonomy tag used in structured fallback logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ConfigurationError { .. } => "configuration_error",
            Self::Transport { .. } => "transport_error",
            Self::HttpStatus { .. } => "http_status_error",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Validation { .. } => "validation_error",
            Self::Scheduler { .. } => "scheduler_error",
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================
    //
    // These methods log the error at the appropriate level when created.
    // Use them instead of constructing variants directly.

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "LLM configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn transport(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "transport_error",
            message = %message,
            has_source = source.is_some(),
            "LLM request transport failure"
        );
        Self::Transport { message, source }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        // Char-wise so a multibyte body can't panic the truncation
        let body: String = body.into().chars().take(200).collect();
        log_warn!(
            error_type = "http_status_error",
            status = status,
            body = %body,
            "LLM provider returned error status"
        );
        Self::HttpStatus { status, body }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "malformed_response",
            message = %message,
            "LLM response envelope did not match provider schema"
        );
        Self::MalformedResponse { message }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "validation_error",
            message = %message,
            "LLM sentiment payload failed validation"
        );
        Self::Validation { message }
    }

    pub fn scheduler(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "scheduler_error",
            message = %message,
            "Batch scheduler failure"
        );
        Self::Scheduler { message }
    }
}
