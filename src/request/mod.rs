//! 请求构建层：组装聊天补全请求的载荷。
//!
//! # Request Layer
//!
//! [`ChatCompletionRequest`] is the payload sent to `chat/completions`. Its serde field
//! order is the documented key order of the wire payload, and every optional field is
//! skipped when unset: the API treats an absent field differently from an explicit
//! default, so presence always means the caller asked for it.
//!
//! [`ChatCompletionRequestBuilder`] is the fluent way to assemble one.

mod builder;

pub use builder::ChatCompletionRequestBuilder;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::message::Message;
use crate::types::tool::{FunctionDefinition, ToolChoice, ToolDefinition};

/// Free-form JSON object used for passthrough parameters.
pub type JsonObject = serde_json::Map<String, Value>;

/// Chat completion payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub options: RequestOptions,
}

impl ChatCompletionRequest {
    /// Serialize to a JSON value (the shape posted to the API).
    pub fn to_payload(&self) -> crate::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn is_stream(&self) -> bool {
        self.options.stream.unwrap_or(false)
    }
}

/// Optional request parameters, in wire key order.
///
/// Deprecated parameters are kept at the end; they are still emitted when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_custom: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_tool_validation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_reasoning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_format: Option<ReasoningFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_settings: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_tier: Option<ServiceTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopSequence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    // Deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// `response_format` parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
    JsonSchema { json_schema: Value },
}

/// `stop` parameter: a single sequence or up to four of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopSequence {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for StopSequence {
    fn from(s: &str) -> Self {
        StopSequence::Single(s.to_string())
    }
}

impl From<String> for StopSequence {
    fn from(s: String) -> Self {
        StopSequence::Single(s)
    }
}

impl From<Vec<String>> for StopSequence {
    fn from(v: Vec<String>) -> Self {
        StopSequence::Many(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTier {
    Auto,
    OnDemand,
    Flex,
    Performance,
}

/// How reasoning tokens are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningFormat {
    Hidden,
    Raw,
    Parsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    None,
    Default,
    Low,
    Medium,
    High,
}
