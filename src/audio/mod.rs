//! 音频模块：语音转写、翻译与语音合成。
//!
//! Thin passthroughs over the Groq audio endpoints; no audio is decoded or encoded here.

mod client;
mod types;

pub use client::AudioClient;
pub use types::{
    AudioFile, SpeechAudio, SpeechFormat, SpeechRequest, TimestampGranularity, Transcription,
    TranscriptionFormat, TranscriptionRequest, TranscriptionSegment, TranscriptionWord,
    TranslationRequest, DEFAULT_SPEECH_MODEL, DEFAULT_TRANSCRIPTION_MODEL,
    DEFAULT_TRANSLATION_MODEL,
};
