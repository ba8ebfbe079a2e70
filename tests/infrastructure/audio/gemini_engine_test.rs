use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;

use voxscribe::application::ports::{ProgressReporter, TranscriptionEngine, TranscriptionError};
use voxscribe::domain::{ApiKey, AudioUpload, Provider};
use voxscribe::infrastructure::audio::{DEFAULT_GEMINI_PROMPT, GeminiEngine};

use crate::helpers::start_mock_provider;

const AUDIO: &[u8] = b"\x00\x00\x00\x18ftypM4A fake";

fn upload() -> AudioUpload {
    AudioUpload::validate("voice.m4a", Some("audio/x-m4a"), Bytes::from_static(AUDIO), 1024)
        .unwrap()
}

fn key() -> ApiKey {
    ApiKey::parse("gemini-key").unwrap()
}

fn engine(base_url: &str) -> GeminiEngine {
    GeminiEngine::new(reqwest::Client::new(), Some(base_url.to_string()), None, None)
}

#[tokio::test]
async fn given_candidate_reply_when_transcribing_then_returns_first_part_text() {
    let mock = start_mock_provider(
        200,
        r#"{"candidates": [{"content": {"parts": [{"text": "สวัสดีครับ\n"}], "role": "model"}}]}"#,
        &[],
    )
    .await;

    let transcript = engine(&mock.base_url)
        .transcribe(&upload(), &key(), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(transcript.text, "สวัสดีครับ");
    assert!(transcript.language.is_none());
}

#[tokio::test]
async fn given_upload_when_transcribing_then_posts_base64_inline_data() {
    let mock = start_mock_provider(
        200,
        r#"{"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#,
        &[],
    )
    .await;

    engine(&mock.base_url)
        .transcribe(&upload(), &key(), &ProgressReporter::disabled())
        .await
        .unwrap();

    let request = &mock.captured()[0];
    assert_eq!(
        request.uri.path(),
        "/v1beta/models/gemini-1.5-flash:generateContent"
    );
    assert_eq!(request.header("x-goog-api-key").as_deref(), Some("gemini-key"));

    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], DEFAULT_GEMINI_PROMPT);
    assert_eq!(parts[1]["inline_data"]["mime_type"], "audio/mp4");
    let encoded = parts[1]["inline_data"]["data"].as_str().unwrap();
    assert_eq!(general_purpose::STANDARD.decode(encoded).unwrap(), AUDIO);
}

#[tokio::test]
async fn given_custom_model_and_prompt_when_transcribing_then_both_are_used() {
    let mock = start_mock_provider(
        200,
        r#"{"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#,
        &[],
    )
    .await;
    let engine = GeminiEngine::new(
        reqwest::Client::new(),
        Some(mock.base_url.clone()),
        Some("gemini-2.0-flash".to_string()),
        Some("Transcribe verbatim.".to_string()),
    );

    engine
        .transcribe(&upload(), &key(), &ProgressReporter::disabled())
        .await
        .unwrap();

    let request = &mock.captured()[0];
    assert_eq!(
        request.uri.path(),
        "/v1beta/models/gemini-2.0-flash:generateContent"
    );
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Transcribe verbatim.");
}

#[tokio::test]
async fn given_forbidden_reply_when_transcribing_then_returns_invalid_credential() {
    let mock = start_mock_provider(
        403,
        r#"{"error": {"code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED"}}"#,
        &[],
    )
    .await;

    let result = engine(&mock.base_url)
        .transcribe(&upload(), &key(), &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::InvalidCredential(Provider::Gemini))
    ));
}

#[tokio::test]
async fn given_invalid_key_bad_request_when_transcribing_then_returns_invalid_credential() {
    let mock = start_mock_provider(
        400,
        r#"{"error": {"code": 400, "message": "API key not valid.", "details": [{"reason": "API_KEY_INVALID"}]}}"#,
        &[],
    )
    .await;

    let result = engine(&mock.base_url)
        .transcribe(&upload(), &key(), &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::InvalidCredential(Provider::Gemini))
    ));
}

#[tokio::test]
async fn given_no_candidates_when_transcribing_then_returns_no_text() {
    let mock = start_mock_provider(
        200,
        r#"{"promptFeedback": {"blockReason": "OTHER"}}"#,
        &[],
    )
    .await;

    let result = engine(&mock.base_url)
        .transcribe(&upload(), &key(), &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::NoTextReturned(Provider::Gemini))
    ));
}
