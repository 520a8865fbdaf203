//! Audio client: transcription, translation and speech synthesis.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use tracing::debug;

use super::types::{
    AudioFile, SpeechAudio, SpeechRequest, Transcription,
    TranscriptionFormat, TranscriptionRequest, TranslationRequest,
};
use crate::error::{Error, ErrorContext};
use crate::transport::{HttpTransport, TransportError};
use crate::Result;

const TRANSCRIPTIONS: &str = "audio/transcriptions";
const TRANSLATIONS: &str = "audio/translations";
const SPEECH: &str = "audio/speech";

#[derive(Clone)]
pub struct AudioClient {
    transport: Arc<HttpTransport>,
}

impl AudioClient {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcription> {
        let mut form = source_form(request.file, request.url, &request.model)?;
        form = optional_text(form, "prompt", request.prompt);
        form = form.text("response_format", request.response_format.as_str());
        form = optional_text(form, "language", request.language);
        if let Some(t) = request.temperature {
            form = form.text("temperature", t.to_string());
        }
        for granularity in &request.timestamp_granularities {
            form = form.text("timestamp_granularities[]", granularity.as_str());
        }

        debug!(model = %request.model, "sending transcription");
        let body = self.transport.post_multipart(TRANSCRIPTIONS, form).await?;
        parse_transcription(&body, request.response_format)
    }

    /// Transcribe and translate into English.
    pub async fn translate(&self, request: TranslationRequest) -> Result<Transcription> {
        let mut form = source_form(request.file, request.url, &request.model)?;
        form = optional_text(form, "prompt", request.prompt);
        form = form.text("response_format", request.response_format.as_str());
        if let Some(t) = request.temperature {
            form = form.text("temperature", t.to_string());
        }

        debug!(model = %request.model, "sending translation");
        let body = self.transport.post_multipart(TRANSLATIONS, form).await?;
        parse_transcription(&body, request.response_format)
    }

    pub async fn speech(&self, request: &SpeechRequest) -> Result<SpeechAudio> {
        if request.input.trim().is_empty() {
            return Err(Error::validation_with_context(
                "Speech input cannot be empty",
                ErrorContext::new().with_field_path("input"),
            ));
        }
        debug!(model = %request.model, voice = %request.voice, "sending speech synthesis");
        let data = self.transport.post_json(SPEECH, request).await?;
        Ok(SpeechAudio {
            data,
            format: request.response_format,
        })
    }
}

fn source_form(file: Option<AudioFile>, url: Option<String>, model: &str) -> Result<Form> {
    let url = url.filter(|u| !u.trim().is_empty());
    if file.is_none() && url.is_none() {
        return Err(Error::validation_with_context(
            "Either an audio file or an audio URL is required",
            ErrorContext::new().with_field_path("file"),
        ));
    }

    let mut form = Form::new().text("model", model.to_string());
    if let Some(file) = file {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name)
            .mime_str("application/octet-stream")
            .map_err(TransportError::from)?;
        form = form.part("file", part);
    }
    if let Some(url) = url {
        form = form.text("url", url);
    }
    Ok(form)
}

/// Blank values are not sent.
fn optional_text(form: Form, name: &'static str, value: Option<String>) -> Form {
    match value {
        Some(v) if !v.trim().is_empty() => form.text(name, v),
        _ => form,
    }
}

fn parse_transcription(body: &Bytes, format: TranscriptionFormat) -> Result<Transcription> {
    match format {
        TranscriptionFormat::Text => Ok(Transcription {
            text: String::from_utf8_lossy(body).trim_end().to_string(),
            ..Transcription::default()
        }),
        TranscriptionFormat::Json | TranscriptionFormat::VerboseJson => {
            Ok(serde_json::from_slice(body)?)
        }
    }
}
