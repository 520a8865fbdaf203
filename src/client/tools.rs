//! Two-round tool calling.
//!
//! ```text
//! Idle -> FirstRequestSent -> Done                                  (no tool calls)
//!                          -> ToolsExecuting -> SecondRequestSent -> Done
//! ```
//!
//! At most two round-trips happen. Tool calls returned by the second response
//! are not inspected.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Error, ErrorContext};
use crate::request::ChatCompletionRequestBuilder;
use crate::transport::ChatTransport;
use crate::types::message::Message;
use crate::types::tool::{Tool, ToolCall, ToolChoice, ToolDefinition};
use crate::Result;

/// What to do when the model calls a tool that was not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownToolPolicy {
    /// Skip the call with a warning; no tool message is appended for it.
    #[default]
    Skip,
    /// Abort the conversation with [`Error::UnknownTool`].
    Fail,
}

/// Outcome of [`ToolConversationRunner::run_with_transcript`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConversation {
    /// Text content of the last response, or empty.
    pub content: String,
    /// Messages of the last request sent.
    pub messages: Vec<Message>,
    /// 1 when no tool was requested, otherwise 2.
    pub round_trips: u8,
}

/// Drives a prompt that may need local tools through at most two round-trips.
///
/// Tool calls are executed one after another in the order the model listed them,
/// and their results are appended in that same order. A failing tool aborts the
/// conversation with its error; nothing is retried.
#[derive(Clone)]
pub struct ToolConversationRunner {
    transport: Arc<dyn ChatTransport>,
    unknown_tool_policy: UnknownToolPolicy,
}

impl ToolConversationRunner {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            unknown_tool_policy: UnknownToolPolicy::default(),
        }
    }

    pub fn with_unknown_tool_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.unknown_tool_policy = policy;
        self
    }

    pub fn unknown_tool_policy(&self) -> UnknownToolPolicy {
        self.unknown_tool_policy
    }

    /// Run the conversation and return the final text.
    pub async fn run(
        &self,
        user_prompt: &str,
        tools: &[Tool],
        model: &str,
        system_message: &str,
    ) -> Result<String> {
        self.run_with_transcript(user_prompt, tools, model, system_message)
            .await
            .map(|conversation| conversation.content)
    }

    /// Like [`run`](Self::run), also returning the messages of the last request.
    ///
    /// A blank `system_message` is left out. With an empty `tools` slice no
    /// `tools`/`tool_choice` keys are sent.
    pub async fn run_with_transcript(
        &self,
        user_prompt: &str,
        tools: &[Tool],
        model: &str,
        system_message: &str,
    ) -> Result<ToolConversation> {
        ensure_unique_names(tools)?;

        let mut builder = ChatCompletionRequestBuilder::new()
            .with_model(model)
            .with_user_prompt(user_prompt)?;
        if !system_message.trim().is_empty() {
            builder = builder.with_system_prompt(system_message);
        }
        if !tools.is_empty() {
            let definitions: Vec<ToolDefinition> =
                tools.iter().map(|t| t.definition().clone()).collect();
            builder = builder
                .with_tools(definitions)
                .with_tool_choice(ToolChoice::auto());
        }
        let mut request = builder.build()?;

        let first = self.transport.send_chat_completion(&request).await?;
        let assistant = match first.first_message() {
            Some(message) if !message.requested_tool_calls().is_empty() => message,
            _ => {
                return Ok(ToolConversation {
                    content: first.content(),
                    messages: request.messages,
                    round_trips: 1,
                })
            }
        };

        let calls = assistant.requested_tool_calls();
        debug!(count = calls.len(), "model requested tool calls");

        let mut messages = request.messages.clone();
        let text = assistant.text();
        messages.push(Message::assistant_tool_calls(
            (!text.is_empty()).then_some(text),
            calls.to_vec(),
        ));

        for call in calls {
            let Some(tool) = self.resolve(call, tools)? else {
                continue;
            };
            if call.function.arguments.trim().is_empty() {
                warn!(
                    tool = tool.name(),
                    tool_call_id = %call.id,
                    "skipping tool call with empty arguments"
                );
                continue;
            }

            debug!(tool = tool.name(), tool_call_id = %call.id, "executing tool");
            let result = tool.execute(&call.function.arguments).await?;
            messages.push(Message::tool_result(&call.id, tool.name(), result));
        }

        // Same payload as the first round; only the conversation grows.
        request.messages = messages;
        let second = self.transport.send_chat_completion(&request).await?;

        Ok(ToolConversation {
            content: second.content(),
            messages: request.messages,
            round_trips: 2,
        })
    }

    fn resolve<'t>(&self, call: &ToolCall, tools: &'t [Tool]) -> Result<Option<&'t Tool>> {
        let name = call.function.name.as_str();
        let found = if name.is_empty() {
            None
        } else {
            tools.iter().find(|t| t.name() == name)
        };
        if found.is_some() {
            return Ok(found);
        }

        match self.unknown_tool_policy {
            UnknownToolPolicy::Skip => {
                warn!(tool = name, tool_call_id = %call.id, "skipping call to unknown tool");
                Ok(None)
            }
            UnknownToolPolicy::Fail => Err(Error::UnknownTool {
                name: name.to_string(),
                tool_call_id: call.id.clone(),
            }),
        }
    }
}

fn ensure_unique_names(tools: &[Tool]) -> Result<()> {
    let mut seen = HashSet::with_capacity(tools.len());
    for tool in tools {
        if !seen.insert(tool.name()) {
            return Err(Error::configuration_with_context(
                format!("Duplicate tool name `{}`", tool.name()),
                ErrorContext::new()
                    .with_field_path("tools")
                    .with_source("tool_conversation"),
            ));
        }
    }
    Ok(())
}
