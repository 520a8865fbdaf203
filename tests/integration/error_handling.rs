//! Error propagation from the HTTP layer

use crate::integration::mock_server::{MockServerFixture, CHAT_PATH};
use groq_client::error_code::ApiErrorKind;
use groq_client::{ChatCompletionRequest, ChatCompletionRequestBuilder, Error, GroqClient, Tool};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn request() -> ChatCompletionRequest {
    ChatCompletionRequestBuilder::new()
        .with_model("llama-3.3-70b-versatile")
        .with_user_prompt("Hi")
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_rate_limit_maps_to_remote_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            CHAT_PATH,
            429,
            r#"{"error":{"message":"Rate limit reached for model","type":"tokens","code":"rate_limit_exceeded"}}"#,
        )
        .await;

    let err = fixture.client().chat().create(&request()).await.unwrap_err();

    assert!(err.is_transport());
    assert!(err.is_retryable());
    assert_eq!(err.status(), Some(429));
    match err {
        Error::Remote {
            kind,
            message,
            body,
            ..
        } => {
            assert_eq!(kind, ApiErrorKind::RateLimited);
            assert_eq!(message, "Rate limit reached for model");
            assert!(body.contains("rate_limit_exceeded"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_key_maps_to_authentication() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            CHAT_PATH,
            401,
            r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#,
        )
        .await;

    let err = fixture.client().chat().create(&request()).await.unwrap_err();

    assert!(!err.is_retryable());
    assert!(matches!(
        err,
        Error::Remote {
            status: 401,
            kind: ApiErrorKind::Authentication,
            ..
        }
    ));
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(CHAT_PATH, 503, "upstream overloaded")
        .await;

    let err = fixture.client().chat().create(&request()).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(matches!(err, Error::Remote { ref body, .. } if body == "upstream overloaded"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = GroqClient::builder()
        .api_key("gsk_test")
        .base_url("http://127.0.0.1:1/openai/v1")
        .build()
        .unwrap();

    let err = client.chat().create(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_first_round_failure_runs_no_tools() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(CHAT_PATH, 500, r#"{"error":{"message":"boom"}}"#)
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let tool = Tool::from_fn(
        "get_weather",
        "Current weather",
        json!({"type": "object"}),
        move |_args: String| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("{}".to_string())
            }
        },
    );

    let err = fixture
        .client()
        .tools()
        .run("Weather?", &[tool], "llama-3.3-70b-versatile", "")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_missing_api_key_is_configuration_error() {
    let err = GroqClient::builder()
        .api_key("")
        .base_url("http://127.0.0.1:1/openai/v1")
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("api_key")
    );
}
