//! Vision and audio passthroughs over HTTP

use crate::integration::mock_server::{completion_body, MockServerFixture, CHAT_PATH};
use groq_client::audio::{
    AudioFile, SpeechFormat, SpeechRequest, TimestampGranularity, TranscriptionFormat,
    TranscriptionRequest, TranslationRequest,
};
use groq_client::client::DEFAULT_VISION_MODEL;
use groq_client::Error;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_vision_json_mode_sends_image_part() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_matching(
            CHAT_PATH,
            Matcher::Json(json!({
                "model": DEFAULT_VISION_MODEL,
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "List the objects as JSON."},
                        {"type": "image_url", "image_url": {"url": "https://example.com/desk.jpg"}}
                    ]
                }],
                "response_format": {"type": "json_object"}
            })),
            &completion_body(r#"{"objects":["lamp","laptop"]}"#),
        )
        .await;

    let response = fixture
        .client()
        .vision()
        .complete_json_mode("https://example.com/desk.jpg", "List the objects as JSON.", None)
        .await
        .unwrap();

    mock.assert_async().await;
    let parsed: serde_json::Value = serde_json::from_str(&response.content()).unwrap();
    assert_eq!(parsed["objects"][1], "laptop");
}

#[tokio::test]
async fn test_vision_rejects_relative_url_before_sending() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", CHAT_PATH)
            .expect(0)
            .create_async()
            .await
    };

    let err = fixture
        .client()
        .vision()
        .complete_with_image_url("desk.jpg", "Describe", None, Some(0.1))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn test_transcription_posts_multipart_form() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/openai/v1/audio/transcriptions")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="clip.wav""#.to_string()),
                Matcher::Regex("whisper-large-v3-turbo".to_string()),
                Matcher::Regex(r#"name="language""#.to_string()),
                Matcher::Regex("verbose_json".to_string()),
                Matcher::Regex(r#"name="timestamp_granularities\[\]""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "text": "Hello there.",
                    "language": "english",
                    "duration": 1.2,
                    "words": [
                        {"word": "Hello", "start": 0.0, "end": 0.5},
                        {"word": "there", "start": 0.6, "end": 1.1}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await
    };

    let request = TranscriptionRequest::from_file(AudioFile::new(
        b"RIFF0000WAVEfmt ".to_vec(),
        "clip.wav",
    ))
    .language("en")
    .response_format(TranscriptionFormat::VerboseJson)
    .timestamp_granularity(TimestampGranularity::Word);

    let transcription = fixture.client().audio().transcribe(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(transcription.text, "Hello there.");
    assert_eq!(transcription.words.map(|w| w.len()), Some(2));
}

#[tokio::test]
async fn test_translation_text_format_returns_raw_body() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/openai/v1/audio/translations")
            .match_body(Matcher::Regex(r#"name="url""#.to_string()))
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("Good morning.\n")
            .create_async()
            .await
    };

    let request = TranslationRequest::from_url("https://example.com/bonjour.mp3")
        .response_format(TranscriptionFormat::Text);
    let translation = fixture.client().audio().translate(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(translation.text, "Good morning.");
}

#[tokio::test]
async fn test_speech_returns_audio_bytes() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_matching(
            "/openai/v1/audio/speech",
            Matcher::Json(json!({
                "model": "playai-tts",
                "input": "Welcome aboard",
                "voice": "Fritz-PlayAI",
                "response_format": "mp3"
            })),
            "ID3fakeaudio",
        )
        .await;

    let request =
        SpeechRequest::new("Welcome aboard", "Fritz-PlayAI").response_format(SpeechFormat::Mp3);
    let audio = fixture.client().audio().speech(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(&audio.data[..], b"ID3fakeaudio");
    assert_eq!(audio.format, SpeechFormat::Mp3);
}
