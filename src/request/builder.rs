//! Fluent builder for [`ChatCompletionRequest`].

use serde_json::Value;
use tracing::warn;

use super::{
    ChatCompletionRequest, JsonObject, ReasoningEffort, ReasoningFormat, RequestOptions,
    ResponseFormat, ServiceTier, StopSequence,
};
use crate::error::{Error, ErrorContext};
use crate::types::message::{ContentPart, Message};
use crate::types::tool::{FunctionDefinition, ToolChoice, ToolDefinition};
use crate::Result;

/// Builder for chat completion payloads.
///
/// Messages come from one of two paths:
///
/// - the raw path, [`with_messages`](Self::with_messages), used verbatim;
/// - the convenience path ([`with_system_prompt`](Self::with_system_prompt),
///   [`with_assistant_prompt`](Self::with_assistant_prompt),
///   [`with_user_prompt`](Self::with_user_prompt), [`with_image_url`](Self::with_image_url)),
///   synthesized as `system → assistant → user`.
///
/// When raw messages are set the convenience inputs are ignored.
///
/// [`build`](Self::build) borrows the builder, so it can be called again (for
/// example after tweaking the temperature) and yields equal payloads for equal
/// configuration.
///
/// ```rust
/// use groq_client::request::ChatCompletionRequestBuilder;
///
/// let request = ChatCompletionRequestBuilder::new()
///     .with_model("llama-3.3-70b-versatile")
///     .with_system_prompt("Answer in one word.")
///     .with_user_prompt("Capital of France?")?
///     .with_temperature(0.2)
///     .build()?;
///
/// let payload = serde_json::to_value(&request)?;
/// assert_eq!(payload["messages"][0]["role"], "system");
/// assert!(payload.get("top_p").is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatCompletionRequestBuilder {
    model: Option<String>,
    messages: Option<Vec<Message>>,
    system_prompt: Option<String>,
    assistant_prompt: Option<String>,
    user_prompt: Option<String>,
    image_url: Option<String>,
    options: RequestOptions,
}

impl ChatCompletionRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Raw message list. Overrides every convenience prompt.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Assistant seed message, placed between the system and user messages.
    pub fn with_assistant_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.assistant_prompt = Some(prompt.into());
        self
    }

    /// User prompt. Fails on an empty or whitespace-only prompt.
    pub fn with_user_prompt(mut self, prompt: impl Into<String>) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(Error::validation_with_context(
                "User prompt cannot be empty",
                ErrorContext::new().with_field_path("user_prompt"),
            ));
        }
        self.user_prompt = Some(prompt);
        Ok(self)
    }

    /// Attach an image to the synthesized user message.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// JSON schema response format given as raw JSON text.
    ///
    /// The text is parsed immediately; invalid JSON fails here rather than at
    /// [`build`](Self::build).
    pub fn with_response_format(mut self, json_schema: &str) -> Result<Self> {
        let json_schema: Value =
            serde_json::from_str(json_schema).map_err(|source| Error::MalformedJson {
                field: "response_format".to_string(),
                source,
            })?;
        self.options.response_format = Some(ResponseFormat::JsonSchema { json_schema });
        Ok(self)
    }

    pub fn with_response_format_value(mut self, format: ResponseFormat) -> Self {
        self.options.response_format = Some(format);
        self
    }

    pub fn with_citation_options(mut self, value: impl Into<String>) -> Self {
        self.options.citation_options = Some(value.into());
        self
    }

    /// Custom configuration for compound models.
    pub fn with_compound_custom(mut self, value: JsonObject) -> Self {
        self.options.compound_custom = Some(value);
        self
    }

    pub fn with_disable_tool_validation(mut self, value: bool) -> Self {
        self.options.disable_tool_validation = Some(value);
        self
    }

    pub fn with_documents(mut self, documents: Vec<Value>) -> Self {
        self.options.documents = Some(documents);
        self
    }

    pub fn with_frequency_penalty(mut self, value: f64) -> Self {
        self.options.frequency_penalty = Some(value);
        self
    }

    pub fn with_include_reasoning(mut self, value: bool) -> Self {
        self.options.include_reasoning = Some(value);
        self
    }

    pub fn with_logit_bias(mut self, value: JsonObject) -> Self {
        self.options.logit_bias = Some(value);
        self
    }

    pub fn with_logprobs(mut self, value: bool) -> Self {
        self.options.logprobs = Some(value);
        self
    }

    pub fn with_max_completion_tokens(mut self, value: u32) -> Self {
        self.options.max_completion_tokens = Some(value);
        self
    }

    pub fn with_metadata(mut self, value: JsonObject) -> Self {
        self.options.metadata = Some(value);
        self
    }

    pub fn with_n(mut self, value: u32) -> Self {
        self.options.n = Some(value);
        self
    }

    pub fn with_parallel_tool_calls(mut self, value: bool) -> Self {
        self.options.parallel_tool_calls = Some(value);
        self
    }

    pub fn with_presence_penalty(mut self, value: f64) -> Self {
        self.options.presence_penalty = Some(value);
        self
    }

    pub fn with_reasoning_effort(mut self, value: ReasoningEffort) -> Self {
        self.options.reasoning_effort = Some(value);
        self
    }

    pub fn with_reasoning_format(mut self, value: ReasoningFormat) -> Self {
        self.options.reasoning_format = Some(value);
        self
    }

    pub fn with_search_settings(mut self, value: JsonObject) -> Self {
        self.options.search_settings = Some(value);
        self
    }

    pub fn with_seed(mut self, value: i64) -> Self {
        self.options.seed = Some(value);
        self
    }

    pub fn with_service_tier(mut self, value: ServiceTier) -> Self {
        self.options.service_tier = Some(value);
        self
    }

    pub fn with_stop(mut self, stop: impl Into<StopSequence>) -> Self {
        self.options.stop = Some(stop.into());
        self
    }

    pub fn with_store(mut self, value: bool) -> Self {
        self.options.store = Some(value);
        self
    }

    pub fn with_stream(mut self, value: bool) -> Self {
        self.options.stream = Some(value);
        self
    }

    pub fn with_stream_options(mut self, value: JsonObject) -> Self {
        self.options.stream_options = Some(value);
        self
    }

    pub fn with_temperature(mut self, value: f64) -> Self {
        self.options.temperature = Some(value);
        self
    }

    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.options.tool_choice = Some(choice);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.options.tools = Some(tools);
        self
    }

    pub fn with_top_logprobs(mut self, value: u32) -> Self {
        self.options.top_logprobs = Some(value);
        self
    }

    pub fn with_top_p(mut self, value: f64) -> Self {
        self.options.top_p = Some(value);
        self
    }

    /// End-user identifier forwarded to the API.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.options.user = Some(user.into());
        self
    }

    #[deprecated(note = "use `with_search_settings` instead")]
    pub fn with_exclude_domains(mut self, domains: Vec<String>) -> Self {
        self.options.exclude_domains = Some(domains);
        self
    }

    #[deprecated(note = "use `with_tool_choice` instead")]
    pub fn with_function_call(mut self, value: Value) -> Self {
        self.options.function_call = Some(value);
        self
    }

    #[deprecated(note = "use `with_tools` instead")]
    pub fn with_functions(mut self, functions: Vec<FunctionDefinition>) -> Self {
        self.options.functions = Some(functions);
        self
    }

    #[deprecated(note = "use `with_search_settings` instead")]
    pub fn with_include_domains(mut self, domains: Vec<String>) -> Self {
        self.options.include_domains = Some(domains);
        self
    }

    #[deprecated(note = "use `with_max_completion_tokens` instead")]
    pub fn with_max_tokens(mut self, value: u32) -> Self {
        self.options.max_tokens = Some(value);
        self
    }

    /// Assemble the payload.
    ///
    /// Fails with a configuration error when the model is missing or blank, or
    /// when neither raw messages nor a user prompt were set.
    pub fn build(&self) -> Result<ChatCompletionRequest> {
        let model = match self.model.as_deref() {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => {
                return Err(Error::configuration_with_context(
                    "Model is required. Use with_model() to set it.",
                    ErrorContext::new()
                        .with_field_path("model")
                        .with_source("request_builder"),
                ))
            }
        };

        Ok(ChatCompletionRequest {
            model,
            messages: self.resolve_messages()?,
            options: self.options.clone(),
        })
    }

    fn resolve_messages(&self) -> Result<Vec<Message>> {
        if let Some(messages) = &self.messages {
            if messages.is_empty() {
                return Err(messages_required());
            }
            if self.has_convenience_input() {
                warn!("raw messages set; ignoring system/assistant/user/image convenience inputs");
            }
            return Ok(messages.clone());
        }

        let user_prompt = self.user_prompt.as_ref().ok_or_else(messages_required)?;

        let mut messages = Vec::with_capacity(3);
        if let Some(system) = &self.system_prompt {
            messages.push(Message::system(system.clone()));
        }
        if let Some(assistant) = &self.assistant_prompt {
            messages.push(Message::assistant(assistant.clone()));
        }
        let user = match &self.image_url {
            Some(url) => Message::user_with_parts(vec![
                ContentPart::text(user_prompt.clone()),
                ContentPart::image_url(url.clone()),
            ]),
            None => Message::user(user_prompt.clone()),
        };
        messages.push(user);
        Ok(messages)
    }

    fn has_convenience_input(&self) -> bool {
        self.system_prompt.is_some()
            || self.assistant_prompt.is_some()
            || self.user_prompt.is_some()
            || self.image_url.is_some()
    }
}

fn messages_required() -> Error {
    Error::configuration_with_context(
        "Messages are required. Use with_user_prompt() or with_messages() to set them.",
        ErrorContext::new()
            .with_field_path("messages")
            .with_source("request_builder"),
    )
}
