use crate::error_code::ApiErrorKind;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "model", "messages[0].content")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "request_builder", "tool_runner")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Groq client.
///
/// Configuration and validation failures are raised synchronously while a request
/// is being assembled; transport, remote and tool failures surface from async calls
/// and are propagated to the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Malformed JSON for `{field}`: {source}")]
    MalformedJson {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Remote error: HTTP {status} ({kind}): {message}")]
    Remote {
        status: u16,
        kind: ApiErrorKind,
        message: String,
        body: String,
    },

    #[error("Tool `{tool}` failed: {message}")]
    ToolExecution { tool: String, message: String },

    #[error("Model requested unknown tool `{name}` (tool_call_id: {tool_call_id})")]
    UnknownTool { name: String, tool_call_id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a configuration error without extra context.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a validation error without extra context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Convenience constructor for tool implementations reporting a hard failure.
    pub fn tool(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::ToolExecution {
            tool: tool.into(),
            message: msg.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// True for errors raised while assembling a request (missing fields, bad JSON input).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. } | Error::MalformedJson { .. }
        )
    }

    /// True when the remote call itself failed, either on the wire or with a non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Remote { .. })
    }

    /// True for rate limits, server errors, overload and timeouts reported by the API.
    ///
    /// Network failures are not classified and return false.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Remote { kind, .. } if kind.retryable())
    }

    /// HTTP status of a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
