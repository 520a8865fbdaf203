//! 类型系统模块：定义 Groq 聊天接口的核心数据类型。
//!
//! # Types Module
//!
//! Strongly-typed representations of the OpenAI-compatible wire format spoken by Groq.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and text or multimodal content |
//! | [`MessageRole`] | `system`, `user`, `assistant` or `tool` |
//! | [`ToolDefinition`] | Tool definition sent to the model |
//! | [`ToolCall`] | Function call requested by the model |
//! | [`Tool`] | Tool definition plus the caller's [`ToolExecutor`] |
//! | [`ChatCompletionResponse`] | Non-streaming response |
//! | [`ChatCompletionChunk`] | One streaming chunk |
//!
//! ## Example
//!
//! ```rust
//! use groq_client::types::{Message, ToolDefinition};
//!
//! let system = Message::system("You are a helpful assistant");
//! let user = Message::user("What's the weather?");
//!
//! let tool = ToolDefinition::function(
//!     "get_weather",
//!     "Get current weather for a location",
//!     serde_json::json!({
//!         "type": "object",
//!         "properties": {"location": {"type": "string"}}
//!     }),
//! );
//! ```

pub mod message;
pub mod response;
pub mod tool;

pub use message::{ContentPart, ImageUrl, Message, MessageContent, MessageRole};
pub use response::{
    ChatCompletionChunk, ChatCompletionResponse, Choice, ChunkChoice, Delta, FunctionCallDelta, ModelInfo,
    ModelList, ToolCallDelta, Usage, XGroq,
};
pub use tool::{
    FunctionCall, FunctionDefinition, Tool, ToolCall, ToolChoice, ToolChoiceMode,
    ToolDefinition, ToolExecutor,
};
