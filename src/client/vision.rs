//! Vision completions: a prompt plus one image, by URL or from a local file.

use std::path::Path;
use url::Url;

use super::chat::ChatCompletionClient;
use crate::error::{Error, ErrorContext};
use crate::request::{ChatCompletionRequestBuilder, ResponseFormat};
use crate::types::message::{guess_image_media_type, image_data_url};
use crate::types::response::ChatCompletionResponse;
use crate::types::tool::{ToolChoice, ToolDefinition};
use crate::Result;

pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

#[derive(Clone)]
pub struct VisionClient {
    chat: ChatCompletionClient,
}

impl VisionClient {
    pub fn new(chat: ChatCompletionClient) -> Self {
        Self { chat }
    }

    pub async fn complete_with_image_url(
        &self,
        image_url: &str,
        prompt: &str,
        model: Option<&str>,
        temperature: Option<f64>,
    ) -> Result<ChatCompletionResponse> {
        validate_image_url(image_url)?;
        let mut builder = base_request(image_url, prompt, model)?;
        if let Some(t) = temperature {
            builder = builder.with_temperature(t);
        }
        self.chat.create(&builder.build()?).await
    }

    /// Read a local image and send it inline as a base64 data URL.
    pub async fn complete_with_image_file(
        &self,
        path: impl AsRef<Path>,
        prompt: &str,
        model: Option<&str>,
        temperature: Option<f64>,
    ) -> Result<ChatCompletionResponse> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let image_url = image_data_url(&bytes, guess_image_media_type(path));

        let mut builder = base_request(&image_url, prompt, model)?;
        if let Some(t) = temperature {
            builder = builder.with_temperature(t);
        }
        self.chat.create(&builder.build()?).await
    }

    pub async fn complete_with_tools(
        &self,
        image_url: &str,
        prompt: &str,
        tools: Vec<ToolDefinition>,
        model: Option<&str>,
    ) -> Result<ChatCompletionResponse> {
        validate_image_url(image_url)?;
        let request = base_request(image_url, prompt, model)?
            .with_tools(tools)
            .with_tool_choice(ToolChoice::auto())
            .build()?;
        self.chat.create(&request).await
    }

    /// Ask for a JSON object answer (`response_format = json_object`).
    pub async fn complete_json_mode(
        &self,
        image_url: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<ChatCompletionResponse> {
        validate_image_url(image_url)?;
        let request = base_request(image_url, prompt, model)?
            .with_response_format_value(ResponseFormat::JsonObject)
            .build()?;
        self.chat.create(&request).await
    }
}

fn base_request(
    image_url: &str,
    prompt: &str,
    model: Option<&str>,
) -> Result<ChatCompletionRequestBuilder> {
    Ok(ChatCompletionRequestBuilder::new()
        .with_model(model.unwrap_or(DEFAULT_VISION_MODEL))
        .with_user_prompt(prompt)?
        .with_image_url(image_url))
}

fn validate_image_url(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(Error::validation_with_context(
            "Image URL cannot be empty",
            ErrorContext::new().with_field_path("image_url"),
        ));
    }
    Url::parse(raw).map_err(|e| {
        Error::validation_with_context(
            format!("Invalid image URL format: {}", e),
            ErrorContext::new().with_field_path("image_url"),
        )
    })?;
    Ok(())
}
