use futures::StreamExt;
use std::sync::Arc;

use crate::request::ChatCompletionRequest;
use crate::transport::ChatTransport;
use crate::types::message::{Message, MessageContent, MessageRole};
use crate::types::response::{ChatCompletionChunk, ChatCompletionResponse, Choice};
use crate::utils::ToolCallAssembler;
use crate::{BoxStream, Result};

/// Chat completions, single-shot or streamed.
#[derive(Clone)]
pub struct ChatCompletionClient {
    transport: Arc<dyn ChatTransport>,
}

impl ChatCompletionClient {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        self.transport.send_chat_completion(request).await
    }

    /// Stream a completion. The request is sent with `stream: true` regardless of
    /// what the caller set; the caller's request is not modified.
    pub async fn create_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<BoxStream<'static, ChatCompletionChunk>> {
        if request.is_stream() {
            return self.transport.stream_chat_completion(request).await;
        }
        let mut streaming = request.clone();
        streaming.options.stream = Some(true);
        self.transport.stream_chat_completion(&streaming).await
    }

    /// Fold a chunk stream into a single response for the first choice.
    ///
    /// Content and reasoning deltas are concatenated, tool call fragments are
    /// assembled by index, and usage is taken from the final `x_groq` block.
    pub async fn collect_stream(
        mut stream: BoxStream<'_, ChatCompletionChunk>,
    ) -> Result<ChatCompletionResponse> {
        let mut response = ChatCompletionResponse {
            id: String::new(),
            object: "chat.completion".to_string(),
            created: 0,
            model: String::new(),
            choices: Vec::new(),
            usage: None,
            system_fingerprint: None,
            x_groq: None,
        };
        let mut content = String::new();
        let mut reasoning = String::new();
        let mut tool_calls = ToolCallAssembler::new();
        let mut finish_reason = None;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if response.id.is_empty() {
                response.id = chunk.id.clone();
                response.created = chunk.created;
                response.model = chunk.model.clone();
            }
            if chunk.system_fingerprint.is_some() {
                response.system_fingerprint = chunk.system_fingerprint.clone();
            }
            if let Some(x_groq) = chunk.x_groq {
                if let Some(usage) = &x_groq.usage {
                    response.usage = Some(usage.clone());
                }
                response.x_groq = Some(x_groq);
            }

            for choice in chunk.choices.into_iter().filter(|c| c.index == 0) {
                if let Some(text) = choice.delta.content {
                    content.push_str(&text);
                }
                if let Some(text) = choice.delta.reasoning {
                    reasoning.push_str(&text);
                }
                for delta in choice.delta.tool_calls.iter().flatten() {
                    tool_calls.push(delta);
                }
                if choice.finish_reason.is_some() {
                    finish_reason = choice.finish_reason;
                }
            }
        }

        let tool_calls = tool_calls.finalize();
        let message = Message {
            role: MessageRole::Assistant,
            content: if content.is_empty() && !tool_calls.is_empty() {
                None
            } else {
                Some(MessageContent::Text(content))
            },
            name: None,
            tool_call_id: None,
            tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
            reasoning: (!reasoning.is_empty()).then_some(reasoning),
        };
        response.choices.push(Choice {
            index: 0,
            message,
            logprobs: None,
            finish_reason,
        });
        Ok(response)
    }
}
