//! Streaming chat: print content deltas as they arrive.
//!
//! Run:
//!   GROQ_API_KEY=your_key cargo run --example streaming_chat

use futures::StreamExt;
use groq_client::{GenerateOptions, GroqClient};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = GroqClient::from_env()?;
    let options = GenerateOptions::new()
        .system_prompt("You are a storyteller.")
        .model("llama-3.1-8b-instant");

    let mut deltas = client
        .text()
        .generate_stream("Tell a four-line story about a lighthouse.", &options)
        .await?;

    let mut stdout = std::io::stdout();
    while let Some(delta) = deltas.next().await {
        write!(stdout, "{}", delta?)?;
        stdout.flush()?;
    }
    println!();
    Ok(())
}
