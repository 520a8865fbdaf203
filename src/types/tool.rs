//! Tool calling definitions (function tools)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::Result;

/// Tool definition as sent in the `tools` array of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters: Some(parameters),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>, // JSON Schema
}

/// Tool call (invocation from model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "default_tool_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: default_tool_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

fn default_tool_type() -> String {
    "function".to_string()
}

/// Function name plus JSON-encoded arguments, exactly as produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

/// Which tool(s) the model may call.
///
/// Serializes to `"none"`, `"auto"`, `"required"` or
/// `{"type":"function","function":{"name":...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolChoice {
    Mode(ToolChoiceMode),
    Function(NamedToolChoice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoiceMode {
    None,
    Auto,
    Required,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedToolChoice {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionName {
    pub name: String,
}

impl ToolChoice {
    pub fn none() -> Self {
        ToolChoice::Mode(ToolChoiceMode::None)
    }

    pub fn auto() -> Self {
        ToolChoice::Mode(ToolChoiceMode::Auto)
    }

    pub fn required() -> Self {
        ToolChoice::Mode(ToolChoiceMode::Required)
    }

    /// Force a specific function.
    pub fn function(name: impl Into<String>) -> Self {
        ToolChoice::Function(NamedToolChoice {
            tool_type: "function".to_string(),
            function: FunctionName { name: name.into() },
        })
    }
}

/// Caller-supplied execution of a tool.
///
/// Receives the raw JSON argument string produced by the model and returns the
/// serialized result that is sent back as the `tool` message content. Recoverable
/// failures should be encoded into the returned JSON; an `Err` aborts the whole
/// conversation.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, arguments: &str) -> Result<String>;
}

/// Adapter turning an async closure into a [`ToolExecutor`].
pub struct FnToolExecutor<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> ToolExecutor for FnToolExecutor<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String>> + Send + 'static,
{
    async fn execute(&self, arguments: &str) -> Result<String> {
        (self.f)(arguments.to_string()).await
    }
}

/// A tool the model may call: its wire definition plus the local executor.
#[derive(Clone)]
pub struct Tool {
    definition: ToolDefinition,
    executor: Arc<dyn ToolExecutor>,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
        executor: impl ToolExecutor + 'static,
    ) -> Self {
        Self {
            definition: ToolDefinition::function(name, description, parameters),
            executor: Arc::new(executor),
        }
    }

    /// Build a tool from an async closure taking the argument JSON string.
    ///
    /// ```rust
    /// use groq_client::types::Tool;
    /// use serde_json::json;
    ///
    /// let tool = Tool::from_fn(
    ///     "get_weather",
    ///     "Current weather for a city",
    ///     json!({"type": "object", "properties": {"city": {"type": "string"}}}),
    ///     |_args: String| async move { Ok(r#"{"temp":20}"#.to_string()) },
    /// );
    /// assert_eq!(tool.name(), "get_weather");
    /// ```
    pub fn from_fn<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
        f: F,
    ) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Self::new(name, description, parameters, FnToolExecutor { f })
    }

    pub fn name(&self) -> &str {
        &self.definition.function.name
    }

    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub async fn execute(&self, arguments: &str) -> Result<String> {
        self.executor.execute(arguments).await
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}
