//! Two-round tool conversations over HTTP

use crate::integration::mock_server::{completion_body, MockServerFixture, CHAT_PATH};
use groq_client::Tool;
use mockito::Matcher;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn tool_call_body() -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "get_weather", "arguments": "{\"city\":\"Paris\"}"}
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
    .to_string()
}

fn weather_tool(seen: Arc<Mutex<Vec<String>>>) -> Tool {
    Tool::from_fn(
        "get_weather",
        "Current weather for a city",
        json!({
            "type": "object",
            "properties": {"city": {"type": "string"}},
            "required": ["city"]
        }),
        move |args: String| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(args);
                Ok(r#"{"temp_c":21}"#.to_string())
            }
        },
    )
}

#[tokio::test]
async fn test_tool_round_trip() {
    let fixture = MockServerFixture::new().await;
    let (second, first) = {
        let mut server = fixture.server.lock().await;
        let second = server
            .mock("POST", CHAT_PATH)
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#""role":"tool""#.to_string()),
                Matcher::PartialJson(json!({
                    "messages": [
                        {"role": "system", "content": "Use tools when useful."},
                        {"role": "user", "content": "Weather in Paris?"},
                        {
                            "role": "assistant",
                            "tool_calls": [{"id": "call_1", "function": {"name": "get_weather"}}]
                        },
                        {"role": "tool", "tool_call_id": "call_1", "content": "{\"temp_c\":21}"}
                    ]
                })),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("It is 21°C in Paris."))
            .expect(1)
            .create_async()
            .await;
        let first = server
            .mock("POST", CHAT_PATH)
            .match_body(Matcher::PartialJson(json!({
                "tools": [{"type": "function", "function": {"name": "get_weather"}}],
                "tool_choice": "auto"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(tool_call_body())
            .expect(1)
            .create_async()
            .await;
        (second, first)
    };

    let seen = Arc::new(Mutex::new(Vec::new()));
    let answer = fixture
        .client()
        .tools()
        .run(
            "Weather in Paris?",
            &[weather_tool(seen.clone())],
            "llama-3.3-70b-versatile",
            "Use tools when useful.",
        )
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(answer, "It is 21°C in Paris.");
    assert_eq!(*seen.lock().unwrap(), vec![r#"{"city":"Paris"}"#.to_string()]);
}

#[tokio::test]
async fn test_plain_answer_needs_one_round_trip() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Hello!"))
            .expect(1)
            .create_async()
            .await
    };

    let seen = Arc::new(Mutex::new(Vec::new()));
    let conversation = fixture
        .client()
        .tools()
        .run_with_transcript(
            "Say hello",
            &[weather_tool(seen.clone())],
            "llama-3.3-70b-versatile",
            "",
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(conversation.content, "Hello!");
    assert_eq!(conversation.round_trips, 1);
    // blank system message is left out
    assert_eq!(conversation.messages.len(), 1);
    assert!(seen.lock().unwrap().is_empty());
}
