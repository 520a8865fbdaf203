//! Basic chat completion against Groq.
//!
//! Prerequisites:
//! - Set `GROQ_API_KEY`
//!
//! Run:
//!   GROQ_API_KEY=your_key cargo run --example basic_chat

use groq_client::request::ReasoningFormat;
use groq_client::{ChatCompletionRequestBuilder, GroqClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if std::env::var("GROQ_API_KEY").is_err() {
        eprintln!("Error: GROQ_API_KEY environment variable is not set.");
        eprintln!("Run with: GROQ_API_KEY=your_key cargo run --example basic_chat");
        std::process::exit(1);
    }

    let client = GroqClient::from_env()?;

    let request = ChatCompletionRequestBuilder::new()
        .with_model(client.default_model())
        .with_system_prompt("You are a concise assistant.")
        .with_user_prompt("Explain in two sentences why the sky is blue.")?
        .with_temperature(0.3)
        .with_max_completion_tokens(256)
        .with_reasoning_format(ReasoningFormat::Hidden)
        .build()?;

    println!("Payload:\n{}\n", serde_json::to_string_pretty(&request.to_payload()?)?);

    let response = client.chat().create(&request).await?;
    println!("{}", response.content());

    if let Some(usage) = &response.usage {
        println!(
            "\n[tokens] prompt={} completion={} total={}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }
    Ok(())
}
