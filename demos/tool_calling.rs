//! Two-round tool calling with a local weather function.
//!
//! The model asks for `get_weather`, the closure below answers, and the
//! model's final text is printed.
//!
//! Run:
//!   GROQ_API_KEY=your_key cargo run --example tool_calling

use groq_client::{GroqClient, Tool};
use serde_json::{json, Value};

fn weather_tool() -> Tool {
    Tool::from_fn(
        "get_weather",
        "Get the current weather for a city",
        json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "City name" },
                "unit": { "type": "string", "enum": ["celsius", "fahrenheit"] }
            },
            "required": ["city"]
        }),
        |args: String| async move {
            let args: Value = serde_json::from_str(&args)?;
            let city = args["city"].as_str().unwrap_or("unknown");
            tracing::info!(city, "weather lookup");
            Ok(json!({ "city": city, "temperature": 21, "conditions": "sunny" }).to_string())
        },
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = GroqClient::from_env()?;

    let conversation = client
        .tools()
        .run_with_transcript(
            "What's the weather like in Lisbon right now?",
            &[weather_tool()],
            "llama-3.3-70b-versatile",
            "You are a helpful assistant. Use tools when they help.",
        )
        .await?;

    println!("{}", conversation.content);
    println!(
        "\n[{} round trip(s), {} messages in final request]",
        conversation.round_trips,
        conversation.messages.len()
    );
    Ok(())
}
