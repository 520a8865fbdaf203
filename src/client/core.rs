use std::sync::Arc;

use super::builder::GroqClientBuilder;
use super::chat::ChatCompletionClient;
use super::text::TextProvider;
use super::tools::{ToolConversationRunner, UnknownToolPolicy};
use crate::transport::{ChatTransport, HttpTransport};
use crate::types::response::ModelList;
use crate::Result;

/// Entry point bundling every Groq capability over one HTTP transport.
///
/// Cloning is cheap: clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GroqClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) default_model: String,
    pub(crate) unknown_tool_policy: UnknownToolPolicy,
}

impl GroqClient {
    pub fn builder() -> GroqClientBuilder {
        GroqClientBuilder::new()
    }

    /// Client configured only from the environment (`GROQ_API_KEY`, ...).
    pub fn from_env() -> Result<Self> {
        GroqClientBuilder::new().build()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    fn chat_transport(&self) -> Arc<dyn ChatTransport> {
        self.transport.clone()
    }

    pub fn chat(&self) -> ChatCompletionClient {
        ChatCompletionClient::new(self.chat_transport())
    }

    pub fn tools(&self) -> ToolConversationRunner {
        ToolConversationRunner::new(self.chat_transport())
            .with_unknown_tool_policy(self.unknown_tool_policy)
    }

    pub fn text(&self) -> TextProvider {
        TextProvider::new(self.chat(), self.default_model.clone())
    }

    #[cfg(feature = "vision")]
    pub fn vision(&self) -> super::vision::VisionClient {
        super::vision::VisionClient::new(self.chat())
    }

    #[cfg(feature = "audio")]
    pub fn audio(&self) -> crate::audio::AudioClient {
        crate::audio::AudioClient::new(self.transport.clone())
    }

    pub async fn list_models(&self) -> Result<ModelList> {
        self.transport.list_models().await
    }
}
