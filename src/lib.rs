//! # groq-client
//!
//! 面向 Groq 推理 API 的强类型异步 Rust 客户端。
//!
//! Typed async client for the Groq inference API (OpenAI-compatible wire format).
//!
//! ## Overview
//!
//! The heart of the crate is small:
//!
//! - [`request::ChatCompletionRequestBuilder`] assembles a chat completion payload
//!   from many optional parameters. Unset parameters never reach the wire.
//! - [`client::ToolConversationRunner`] resolves a prompt that may need local tools
//!   in at most two round-trips: ask, run the requested tools in order, ask again.
//!
//! Both depend only on the [`transport::ChatTransport`] capability, so they can be
//! driven by the bundled reqwest transport or by anything else.
//!
//! Around that core sit thin passthroughs: streaming chat, vision, audio
//! transcription/translation/speech, plain text generation and model listing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use groq_client::request::ChatCompletionRequestBuilder;
//! use groq_client::GroqClient;
//!
//! #[tokio::main]
//! async fn main() -> groq_client::Result<()> {
//!     let client = GroqClient::builder().api_key("gsk_...").build()?;
//!
//!     let request = ChatCompletionRequestBuilder::new()
//!         .with_model("llama-3.3-70b-versatile")
//!         .with_system_prompt("Answer in one word.")
//!         .with_user_prompt("Capital of France?")?
//!         .build()?;
//!
//!     let response = client.chat().create(&request).await?;
//!     println!("{}", response.content());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Request payload and fluent builder |
//! | [`client`] | Facade, chat, tool conversation, text and vision clients |
//! | [`transport`] | Transport capability, HTTP implementation, SSE decoding |
//! | [`types`] | Wire types (messages, tools, responses, chunks, models) |
//! | [`audio`] | Transcription, translation and speech |
//! | [`error`] | Error taxonomy |
//!
//! ## Features
//!
//! - `vision` (default): [`client::VisionClient`]
//! - `audio` (default): [`audio::AudioClient`]

pub mod client;
pub mod error;
pub mod error_code;
pub mod request;
pub mod transport;
pub mod types;
pub mod utils;

#[cfg(feature = "audio")]
pub mod audio;

pub use client::{
    ChatCompletionClient, GenerateOptions, GroqClient, GroqClientBuilder, TextProvider,
    ToolConversation, ToolConversationRunner, UnknownToolPolicy,
};
pub use error::{Error, ErrorContext};
pub use request::{ChatCompletionRequest, ChatCompletionRequestBuilder};
pub use types::{
    message::{Message, MessageRole},
    tool::{Tool, ToolCall, ToolExecutor},
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream of `Result<T>` items
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;
