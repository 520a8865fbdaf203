//! Integration tests with mock HTTP server

pub mod chat;
pub mod error_handling;
pub mod mock_server;
#[cfg(all(feature = "vision", feature = "audio"))]
pub mod multimodal;
pub mod streaming;
pub mod tool_conversation;
