//! Mock HTTP server setup for integration tests

use groq_client::GroqClient;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const CHAT_PATH: &str = "/openai/v1/chat/completions";
pub const TEST_API_KEY: &str = "gsk_test";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = format!("{}/openai/v1", server.url());
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Client pointed at the mock server.
    pub fn client(&self) -> GroqClient {
        GroqClient::builder()
            .api_key(TEST_API_KEY)
            .base_url(&self.base_url)
            .build()
            .expect("client should build")
    }

    /// Successful JSON response on `POST path`.
    pub async fn mock_json_response(&self, path: &str, status: u16, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .with_status(status as usize)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// JSON response returned only when the request body matches `matcher`.
    pub async fn mock_json_matching(&self, path: &str, matcher: Matcher, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .match_body(matcher)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// SSE response: each chunk becomes one `data:` frame.
    pub async fn mock_sse_stream(&self, path: &str, chunks: Vec<&str>) -> Mock {
        let mut server = self.server.lock().await;

        let body = chunks
            .iter()
            .map(|chunk| {
                if chunk.starts_with("data: ") || chunk.starts_with(':') {
                    format!("{}\n\n", chunk)
                } else {
                    format!("data: {}\n\n", chunk)
                }
            })
            .collect::<Vec<_>>()
            .join("");

        server
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await
    }

    pub async fn mock_error_response(&self, path: &str, status: u16, error_body: &str) -> Mock {
        self.mock_json_response(path, status, error_body).await
    }
}

/// Minimal non-streaming completion body carrying `content`.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_730_000_000,
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15},
        "x_groq": {"id": "req_test"}
    })
    .to_string()
}
