//! Chat message format (OpenAI-compatible wire shape used by Groq)

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::tool::ToolCall;

/// A single conversation message.
///
/// Optional fields are omitted from the wire payload when unset, so a plain
/// `Message::user("hi")` serializes to `{"role":"user","content":"hi"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// Parsed reasoning returned by reasoning models (`reasoning_format = "parsed"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Message {
    pub fn with_content(role: MessageRole, content: MessageContent) -> Self {
        Self {
            role,
            content: Some(content),
            name: None,
            tool_call_id: None,
            tool_calls: None,
            reasoning: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::with_content(MessageRole::System, MessageContent::Text(text.into()))
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::with_content(MessageRole::User, MessageContent::Text(text.into()))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_content(MessageRole::Assistant, MessageContent::Text(text.into()))
    }

    /// User message with multimodal content parts (text + images).
    pub fn user_with_parts(parts: Vec<ContentPart>) -> Self {
        Self::with_content(MessageRole::User, MessageContent::Parts(parts))
    }

    /// Assistant turn that requested tool invocations.
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.map(MessageContent::Text),
            name: None,
            tool_call_id: None,
            tool_calls: Some(tool_calls),
            reasoning: None,
        }
    }

    /// Result of one tool call, correlated by `tool_call_id`.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: MessageRole::Tool,
            content: Some(MessageContent::Text(content.into())),
            name: Some(name.into()),
            tool_call_id: Some(tool_call_id.into()),
            tool_calls: None,
            reasoning: None,
        }
    }

    /// Text of the message. Part arrays are flattened by concatenating their text parts.
    pub fn text(&self) -> String {
        match &self.content {
            None => String::new(),
            Some(MessageContent::Text(s)) => s.clone(),
            Some(MessageContent::Parts(parts)) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .collect(),
        }
    }

    /// Tool calls carried by this message; absent and empty are the same thing.
    pub fn requested_tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or(&[])
    }

    pub fn contains_image(&self) -> bool {
        match &self.content {
            Some(MessageContent::Parts(ps)) => {
                ps.iter().any(|p| matches!(p, ContentPart::ImageUrl { .. }))
            }
            _ => false,
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Message content (can be string or array of content parts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn parts(parts: Vec<ContentPart>) -> Self {
        MessageContent::Parts(parts)
    }
}

/// Content part of a multimodal message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Either an http(s) URL or a `data:<mime>;base64,<payload>` URL.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }

    /// Inline image bytes as a base64 data URL.
    pub fn image_bytes(bytes: &[u8], media_type: &str) -> Self {
        Self::image_url(image_data_url(bytes, media_type))
    }
}

/// `data:<media_type>;base64,<payload>`
pub fn image_data_url(bytes: &[u8], media_type: &str) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", media_type, data)
}

/// Guess an image media type from the file extension, defaulting to JPEG.
#[cfg_attr(not(feature = "vision"), allow(dead_code))]
pub(crate) fn guess_image_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}
