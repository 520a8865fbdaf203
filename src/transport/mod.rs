//! 传输层：向 Groq 发送请求并解码响应。
//!
//! # Transport Layer
//!
//! [`ChatTransport`] is the only capability the request core needs from the network:
//! send one chat completion, or open a stream of chunks. [`HttpTransport`] is the
//! reqwest implementation; tests substitute their own.

pub mod http;
pub mod sse;

pub use http::{HttpTransport, HttpTransportConfig};

use async_trait::async_trait;

use crate::request::ChatCompletionRequest;
use crate::types::response::{ChatCompletionChunk, ChatCompletionResponse};
use crate::{BoxStream, Result};

/// Chat completion capability.
///
/// Implementations must fail with a distinguishable error when the remote call
/// does not succeed ([`crate::Error::Remote`] carries status and body). Retries, if
/// any, belong to the implementation; [`crate::Error::is_retryable`] tells transient
/// failures apart.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;

    /// Open a server-sent-event stream. The stream ends at the `[DONE]` sentinel.
    async fn stream_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<BoxStream<'static, ChatCompletionChunk>>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
