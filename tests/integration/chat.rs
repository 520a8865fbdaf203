//! Non-streaming chat completions over HTTP

use crate::integration::mock_server::{completion_body, MockServerFixture, CHAT_PATH};
use groq_client::ChatCompletionRequestBuilder;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_create_sends_only_set_fields() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_matching(
            CHAT_PATH,
            Matcher::Json(json!({
                "model": "llama-3.3-70b-versatile",
                "messages": [
                    {"role": "system", "content": "Answer in one word."},
                    {"role": "user", "content": "Capital of France?"}
                ],
                "max_completion_tokens": 16,
                "temperature": 0.2
            })),
            &completion_body("Paris"),
        )
        .await;

    let request = ChatCompletionRequestBuilder::new()
        .with_model("llama-3.3-70b-versatile")
        .with_system_prompt("Answer in one word.")
        .with_user_prompt("Capital of France?")
        .unwrap()
        .with_temperature(0.2)
        .with_max_completion_tokens(16)
        .build()
        .unwrap();

    let response = fixture.client().chat().create(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.content(), "Paris");
    assert_eq!(response.usage.as_ref().map(|u| u.total_tokens), Some(15));
    assert_eq!(response.x_groq.as_ref().map(|x| x.id.as_str()), Some("req_test"));
}

#[tokio::test]
async fn test_request_carries_auth_and_request_id() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .match_header("authorization", "Bearer gsk_test")
            .match_header("content-type", "application/json")
            .match_header(
                "x-request-id",
                Matcher::Regex(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("ok"))
            .create_async()
            .await
    };

    let request = ChatCompletionRequestBuilder::new()
        .with_model("llama-3.1-8b-instant")
        .with_user_prompt("ping")
        .unwrap()
        .build()
        .unwrap();
    let response = fixture.client().chat().create(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.content(), "ok");
}

#[tokio::test]
async fn test_text_provider_uses_default_model() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_matching(
            CHAT_PATH,
            Matcher::PartialJson(json!({
                "model": "openai/gpt-oss-120b",
                "messages": [
                    {"role": "system", "content": "Be brief."},
                    {"role": "user", "content": "Say hi"}
                ]
            })),
            &completion_body("hi"),
        )
        .await;

    let options = groq_client::GenerateOptions::new().system_prompt("Be brief.");
    let text = fixture
        .client()
        .text()
        .generate("Say hi", &options)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, "hi");
}

#[tokio::test]
async fn test_list_models() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("GET", "/openai/v1/models")
            .match_header("authorization", "Bearer gsk_test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "object": "list",
                    "data": [
                        {"id": "llama-3.3-70b-versatile", "object": "model", "owned_by": "Meta", "active": true, "context_window": 131072},
                        {"id": "whisper-large-v3", "object": "model", "owned_by": "OpenAI", "active": true, "context_window": 448}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await
    };

    let models = fixture.client().list_models().await.unwrap();

    mock.assert_async().await;
    let ids: Vec<&str> = models.data.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["llama-3.3-70b-versatile", "whisper-large-v3"]);
    assert_eq!(models.data[0].context_window, 131072);
}
