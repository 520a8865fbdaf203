//! Audio request and response types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3-turbo";
pub const DEFAULT_TRANSLATION_MODEL: &str = "whisper-large-v3";
pub const DEFAULT_SPEECH_MODEL: &str = "playai-tts";

/// Audio file uploaded as the multipart `file` field.
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub bytes: Bytes,
    pub file_name: String,
}

impl AudioFile {
    pub fn new(bytes: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
        }
    }
}

/// `response_format` for transcriptions and translations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionFormat {
    #[default]
    Json,
    Text,
    VerboseJson,
}

impl TranscriptionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::VerboseJson => "verbose_json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampGranularity {
    Word,
    Segment,
}

impl TimestampGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Segment => "segment",
        }
    }
}

/// Speech-to-text in the spoken language. Either `file` or `url` must be set.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub model: String,
    pub file: Option<AudioFile>,
    pub url: Option<String>,
    pub prompt: Option<String>,
    pub response_format: TranscriptionFormat,
    pub language: Option<String>,
    pub temperature: Option<f32>,
    pub timestamp_granularities: Vec<TimestampGranularity>,
}

impl TranscriptionRequest {
    pub fn from_file(file: AudioFile) -> Self {
        Self::with_source(Some(file), None)
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::with_source(None, Some(url.into()))
    }

    fn with_source(file: Option<AudioFile>, url: Option<String>) -> Self {
        Self {
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            file,
            url,
            prompt: None,
            response_format: TranscriptionFormat::default(),
            language: None,
            temperature: None,
            timestamp_granularities: Vec::new(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn response_format(mut self, format: TranscriptionFormat) -> Self {
        self.response_format = format;
        self
    }

    /// ISO-639-1 code of the input audio.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Only honored with [`TranscriptionFormat::VerboseJson`].
    pub fn timestamp_granularity(mut self, granularity: TimestampGranularity) -> Self {
        self.timestamp_granularities.push(granularity);
        self
    }
}

/// Speech-to-text translated into English. Either `file` or `url` must be set.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub model: String,
    pub file: Option<AudioFile>,
    pub url: Option<String>,
    pub prompt: Option<String>,
    pub response_format: TranscriptionFormat,
    pub temperature: Option<f32>,
}

impl TranslationRequest {
    pub fn from_file(file: AudioFile) -> Self {
        Self::with_source(Some(file), None)
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::with_source(None, Some(url.into()))
    }

    fn with_source(file: Option<AudioFile>, url: Option<String>) -> Self {
        Self {
            model: DEFAULT_TRANSLATION_MODEL.to_string(),
            file,
            url,
            prompt: None,
            response_format: TranscriptionFormat::default(),
            temperature: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn response_format(mut self, format: TranscriptionFormat) -> Self {
        self.response_format = format;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Transcription or translation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<TranscriptionSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<TranscriptionWord>>,
}

/// A segment of transcribed text with timing (seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    #[serde(default)]
    pub id: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechFormat {
    Flac,
    Mp3,
    Mulaw,
    Ogg,
    #[default]
    Wav,
}

impl SpeechFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Flac => "audio/flac",
            Self::Mp3 => "audio/mpeg",
            Self::Mulaw => "audio/basic",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
        }
    }
}

/// Text-to-speech request (JSON body of `audio/speech`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub model: String,
    pub input: String,
    /// Voice id, e.g. `Fritz-PlayAI`.
    pub voice: String,
    pub response_format: SpeechFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl SpeechRequest {
    pub fn new(input: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_SPEECH_MODEL.to_string(),
            input: input.into(),
            voice: voice.into(),
            response_format: SpeechFormat::default(),
            sample_rate: None,
            speed: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn response_format(mut self, format: SpeechFormat) -> Self {
        self.response_format = format;
        self
    }

    pub fn sample_rate(mut self, hz: u32) -> Self {
        self.sample_rate = Some(hz);
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Synthesized audio.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub data: Bytes,
    pub format: SpeechFormat,
}
