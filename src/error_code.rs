//! 远程错误分类：将 Groq API 的错误响应归类为稳定的错误种类。
//!
//! Classification of remote API failures.
//!
//! Groq returns OpenAI-style error bodies:
//!
//! ```json
//! {"error": {"message": "...", "type": "invalid_request_error", "code": "model_not_found"}}
//! ```
//!
//! The `code`/`type` fields are preferred when present; otherwise the HTTP status decides.
//!
//! ## Example
//!
//! ```rust
//! use groq_client::error_code::ApiErrorKind;
//!
//! let kind = ApiErrorKind::from_http_status(429);
//! assert_eq!(kind.name(), "rate_limited");
//! assert!(kind.retryable());
//! ```

use serde::Deserialize;
use std::fmt;

/// Stable classification of a non-success API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Malformed request, invalid parameters, or missing required fields
    InvalidRequest,
    /// Invalid, expired, or missing API key
    Authentication,
    /// Valid credentials but insufficient permissions
    PermissionDenied,
    /// Requested model or resource does not exist
    NotFound,
    /// Input exceeds context window or payload size limit
    RequestTooLarge,
    /// Request was well-formed but could not be processed (e.g. tool call validation)
    Unprocessable,
    /// Request rate limit exceeded
    RateLimited,
    /// Internal server error on the provider side
    ServerError,
    /// Service temporarily unavailable / over capacity
    Overloaded,
    /// Request timed out before a response was produced
    Timeout,
    /// Could not be classified
    Unknown,
}

impl ApiErrorKind {
    /// Returns the standard name (e.g., `"invalid_request"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::Unprocessable => "unprocessable",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// The bundled transport never retries; this is a hint for callers and for
    /// custom [`crate::transport::ChatTransport`] implementations that add a retry
    /// policy (see [`crate::Error::is_retryable`]).
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError | Self::Overloaded | Self::Timeout
        )
    }

    /// Maps a provider error `code` or `type` string to a kind.
    pub fn from_provider_code(provider_code: &str) -> Option<Self> {
        let kind = match provider_code {
            "invalid_request" | "invalid_request_error" => Self::InvalidRequest,
            "invalid_api_key" | "authentication_error" => Self::Authentication,
            "permission_denied" | "permission_error" => Self::PermissionDenied,
            "model_not_found" | "model_decommissioned" | "not_found_error" => Self::NotFound,
            "context_length_exceeded" | "request_too_large" => Self::RequestTooLarge,
            "tool_use_failed" | "json_validate_failed" => Self::Unprocessable,
            "rate_limit_exceeded" | "tokens" | "requests" => Self::RateLimited,
            "internal_server_error" | "server_error" => Self::ServerError,
            "service_unavailable" | "over_capacity" => Self::Overloaded,
            _ => return None,
        };
        Some(kind)
    }

    /// Maps an HTTP status code to the most likely kind.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            413 => Self::RequestTooLarge,
            422 => Self::Unprocessable,
            429 => Self::RateLimited,
            500 | 502 => Self::ServerError,
            503 => Self::Overloaded,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Classify a failed response and extract a human-readable message.
///
/// Falls back to the raw body (or the canonical reason phrase) when the body is not
/// an OpenAI-style error envelope.
pub fn classify(status: u16, body: &str) -> (ApiErrorKind, String) {
    let status_kind = ApiErrorKind::from_http_status(status);
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => {
            let kind = env
                .error
                .code
                .as_deref()
                .and_then(ApiErrorKind::from_provider_code)
                .or_else(|| {
                    env.error
                        .error_type
                        .as_deref()
                        .and_then(ApiErrorKind::from_provider_code)
                })
                .unwrap_or(status_kind);
            let message = env
                .error
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| body.to_string());
            (kind, message)
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.to_string()
            };
            (status_kind, message)
        }
    }
}
