use futures::{future, StreamExt};

use super::chat::ChatCompletionClient;
use crate::request::{ChatCompletionRequest, ChatCompletionRequestBuilder};
use crate::{BoxStream, Result};

/// Optional inputs for [`TextProvider`] calls.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub system_prompt: Option<String>,
    /// JSON schema text for structured output; parsed before anything is sent.
    pub response_schema: Option<String>,
    /// Overrides the provider's model.
    pub model: Option<String>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn response_schema(mut self, schema: impl Into<String>) -> Self {
        self.response_schema = Some(schema.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Prompt in, text out.
#[derive(Clone)]
pub struct TextProvider {
    chat: ChatCompletionClient,
    model: String,
}

impl TextProvider {
    pub fn new(chat: ChatCompletionClient, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a completion and return the first choice's text (empty if none).
    pub async fn generate(&self, user_prompt: &str, options: &GenerateOptions) -> Result<String> {
        let request = self.request(user_prompt, options)?;
        let response = self.chat.create(&request).await?;
        Ok(response.content())
    }

    /// Stream content deltas. Chunks without content are dropped.
    pub async fn generate_stream(
        &self,
        user_prompt: &str,
        options: &GenerateOptions,
    ) -> Result<BoxStream<'static, String>> {
        let request = self.request(user_prompt, options)?;
        let chunks = self.chat.create_stream(&request).await?;
        let text = chunks
            .map(|chunk| chunk.map(|c| c.delta_content().to_string()))
            .filter(|item| future::ready(!matches!(item, Ok(s) if s.is_empty())));
        Ok(Box::pin(text))
    }

    fn request(&self, user_prompt: &str, options: &GenerateOptions) -> Result<ChatCompletionRequest> {
        let mut builder = ChatCompletionRequestBuilder::new()
            .with_model(options.model.as_deref().unwrap_or(&self.model))
            .with_user_prompt(user_prompt)?;
        if let Some(system) = &options.system_prompt {
            builder = builder.with_system_prompt(system.clone());
        }
        if let Some(schema) = &options.response_schema {
            builder = builder.with_response_format(schema)?;
        }
        builder.build()
    }
}
