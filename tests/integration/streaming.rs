//! Integration tests for streaming responses

use crate::integration::mock_server::{MockServerFixture, CHAT_PATH};
use futures::{StreamExt, TryStreamExt};
use groq_client::client::ChatCompletionClient;
use groq_client::{ChatCompletionRequestBuilder, GenerateOptions};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_sse_stream_collects_into_response() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .match_header("accept", "text/event-stream")
            .match_body(Matcher::PartialJson(json!({"stream": true})))
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(concat!(
                ": keep-alive\n\n",
                "data: {\"id\":\"c1\",\"model\":\"llama-3.1-8b-instant\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}\n\n",
                "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hello\"}}]}\n\n",
                "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\" World\"}}]}\n\n",
                "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}],",
                "\"x_groq\":{\"id\":\"req_1\",\"usage\":{\"prompt_tokens\":5,\"completion_tokens\":2,\"total_tokens\":7}}}\n\n",
                "data: [DONE]\n\n",
            ))
            .create_async()
            .await
    };

    let request = ChatCompletionRequestBuilder::new()
        .with_model("llama-3.1-8b-instant")
        .with_user_prompt("Greet the world")
        .unwrap()
        .build()
        .unwrap();
    let client = fixture.client();
    let stream = client.chat().create_stream(&request).await.unwrap();
    let response = ChatCompletionClient::collect_stream(stream).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.id, "c1");
    assert_eq!(response.model, "llama-3.1-8b-instant");
    assert_eq!(response.content(), "Hello World");
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(7));
    // the caller's request is left untouched
    assert!(!request.is_stream());
}

#[tokio::test]
async fn test_stream_assembles_tool_call_fragments() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_sse_stream(
            CHAT_PATH,
            vec![
                r#"{"id":"c2","choices":[{"index":0,"delta":{"role":"assistant","tool_calls":[{"index":0,"id":"call_1","type":"function","function":{"name":"get_weather","arguments":""}}]}}]}"#,
                r#"{"id":"c2","choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{\"city\":"}}]}}]}"#,
                r#"{"id":"c2","choices":[{"index":0,"delta":{"tool_calls":[{"index":0,"function":{"arguments":"\"Paris\"}"}}]}}]}"#,
                r#"{"id":"c2","choices":[{"index":0,"delta":{},"finish_reason":"tool_calls"}]}"#,
                "[DONE]",
            ],
        )
        .await;

    let request = ChatCompletionRequestBuilder::new()
        .with_model("llama-3.3-70b-versatile")
        .with_user_prompt("Weather in Paris?")
        .unwrap()
        .with_stream(true)
        .build()
        .unwrap();
    let client = fixture.client();
    let stream = client.chat().create_stream(&request).await.unwrap();
    let response = ChatCompletionClient::collect_stream(stream).await.unwrap();

    let message = response.first_message().unwrap();
    assert!(message.content.is_none());
    let calls = message.requested_tool_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_1");
    assert_eq!(calls[0].function.name, "get_weather");
    assert_eq!(calls[0].function.arguments, r#"{"city":"Paris"}"#);
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("tool_calls"));
}

#[tokio::test]
async fn test_text_stream_yields_non_empty_deltas() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_sse_stream(
            CHAT_PATH,
            vec![
                r#"{"choices":[{"index":0,"delta":{"role":"assistant","content":""}}]}"#,
                r#"{"choices":[{"index":0,"delta":{"content":"one"}}]}"#,
                r#"{"choices":[{"index":0,"delta":{"content":" two"}}]}"#,
                r#"{"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#,
                "[DONE]",
            ],
        )
        .await;

    let deltas: Vec<String> = fixture
        .client()
        .text()
        .generate_stream("Count", &GenerateOptions::new())
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(deltas, ["one", " two"]);
}

#[tokio::test]
async fn test_malformed_frame_surfaces_serialization_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_sse_stream(
            CHAT_PATH,
            vec![
                r#"{"choices":[{"index":0,"delta":{"content":"ok"}}]}"#,
                "{not json",
                "[DONE]",
            ],
        )
        .await;

    let request = ChatCompletionRequestBuilder::new()
        .with_model("llama-3.1-8b-instant")
        .with_user_prompt("hi")
        .unwrap()
        .build()
        .unwrap();
    let mut stream = fixture.client().chat().create_stream(&request).await.unwrap();

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.delta_content(), "ok");
    let second = stream.next().await.unwrap();
    assert!(matches!(second, Err(groq_client::Error::Serialization(_))));
}
