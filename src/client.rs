//! Groq clients built on one shared transport.
//!
//! [`GroqClient`] hands out the specialised clients; each can also be built
//! directly over any [`crate::transport::ChatTransport`].

pub mod builder;
pub mod chat;
pub mod core;
pub mod text;
pub mod tools;
#[cfg(feature = "vision")]
pub mod vision;

pub use builder::{GroqClientBuilder, DEFAULT_MODEL};
pub use chat::ChatCompletionClient;
pub use core::GroqClient;
pub use text::{GenerateOptions, TextProvider};
pub use tools::{ToolConversation, ToolConversationRunner, UnknownToolPolicy};
#[cfg(feature = "vision")]
pub use vision::{VisionClient, DEFAULT_VISION_MODEL};
