use bytes::Bytes;
use tokio::sync::mpsc;

use voxscribe::application::ports::{
    HistoryRepository, ProgressReporter, ProviderTranscript, TranscriptionError,
};
use voxscribe::application::services::TranscribeRequest;
use voxscribe::domain::{
    ApiKey, ProgressStage, Provider, TranscriptionPhase, ValidationError,
};

use crate::helpers::{HarnessBuilder, MB, StubEngine, transcript};

fn request(file_name: &str, mime: &str, data: &[u8]) -> TranscribeRequest {
    TranscribeRequest {
        file_name: file_name.to_string(),
        mime_type: Some(mime.to_string()),
        data: Bytes::copy_from_slice(data),
        provider: None,
        api_key: None,
    }
}

fn english(_: Provider) -> Result<ProviderTranscript, TranscriptionError> {
    Ok(transcript("  Hello from the stub  "))
}

fn thai(_: Provider) -> Result<ProviderTranscript, TranscriptionError> {
    Ok(transcript("สวัสดีครับ"))
}

fn reported(_: Provider) -> Result<ProviderTranscript, TranscriptionError> {
    Ok(ProviderTranscript {
        text: "Bonjour".to_string(),
        language: Some("fr".to_string()),
        duration: Some(4.2),
    })
}

fn rate_limited(provider: Provider) -> Result<ProviderTranscript, TranscriptionError> {
    Err(TranscriptionError::RateLimited {
        provider,
        retry_after_secs: Some(30),
    })
}

fn blank(_: Provider) -> Result<ProviderTranscript, TranscriptionError> {
    Ok(transcript("   "))
}

#[tokio::test]
async fn given_no_request_or_configured_key_when_transcribing_then_fails_without_calling_provider() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new().engine(engine.clone()).build();

    let result = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::MissingCredential(Provider::OpenAi))
    ));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_request_key_and_configured_key_when_transcribing_then_request_key_wins() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine.clone())
        .credential(Provider::OpenAi, "server-key")
        .build();

    let mut req = request("a.mp3", "audio/mpeg", b"abc");
    req.api_key = ApiKey::parse("user-key");
    harness
        .transcription_service
        .transcribe(req, &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(engine.keys(), vec!["user-key".to_string()]);
}

#[tokio::test]
async fn given_only_configured_key_when_transcribing_then_uses_it() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine.clone())
        .credential(Provider::OpenAi, "server-key")
        .build();

    harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(engine.keys(), vec!["server-key".to_string()]);
}

#[tokio::test]
async fn given_unsupported_upload_when_transcribing_then_rejects_before_provider_call() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine.clone())
        .credential(Provider::OpenAi, "k")
        .build();

    let result = harness
        .transcription_service
        .transcribe(request("notes.txt", "text/plain", b"abc"), &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::Validation(ValidationError::UnsupportedFormat(_)))
    ));
    assert_eq!(engine.calls(), 0);
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn given_gemini_provider_when_file_exceeds_twenty_megabytes_then_rejects() {
    let engine = StubEngine::new(Provider::Gemini, english);
    let harness = HarnessBuilder::new()
        .engine(engine.clone())
        .credential(Provider::Gemini, "k")
        .build();

    let data = vec![1u8; (21 * MB) as usize];
    let mut req = request("big.mp3", "audio/mpeg", &data);
    req.provider = Some(Provider::Gemini);

    let result = harness
        .transcription_service
        .transcribe(req, &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::Validation(ValidationError::FileTooLarge { limit, .. })) if limit == 20 * MB
    ));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_configured_ceiling_below_provider_limit_when_validating_then_configured_wins() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .max_file_size(4)
        .build();

    let result = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"12345"), &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::Validation(ValidationError::FileTooLarge { size: 5, limit: 4 }))
    ));
}

#[tokio::test]
async fn given_successful_call_when_transcribing_then_appends_trimmed_entry_to_history() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .build();

    let t = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(t.text, "Hello from the stub");
    assert_eq!(t.file_name, "a.mp3");
    assert_eq!(t.language.as_deref(), Some("English"));

    let history = harness.history.list().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, t.id);
}

#[tokio::test]
async fn given_provider_without_language_when_transcribing_then_heuristic_labels_text() {
    let engine = StubEngine::new(Provider::OpenAi, thai);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .build();

    let t = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(t.language.as_deref(), Some("Thai"));
}

#[tokio::test]
async fn given_provider_reported_language_and_duration_when_transcribing_then_they_are_used() {
    let engine = StubEngine::new(Provider::OpenAi, reported);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .probe(Some(99.0))
        .build();

    let t = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(t.language.as_deref(), Some("French"));
    assert_eq!(t.duration, Some(4.2));
}

#[tokio::test]
async fn given_provider_without_duration_when_transcribing_then_probe_fills_it() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .probe(Some(7.5))
        .build();

    let t = harness
        .transcription_service
        .transcribe(request("a.wav", "audio/wav", b"abc"), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(t.duration, Some(7.5));
}

#[tokio::test]
async fn given_retention_disabled_when_transcription_finishes_then_staged_file_is_deleted() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .build();

    let t = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert!(t.audio_url.is_none());
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn given_retention_enabled_when_transcription_finishes_then_audio_is_served_back() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .retain_audio()
        .build();

    let t = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await
        .unwrap();

    assert_eq!(t.audio_url, Some(format!("/api/audio/{}", t.id)));
    let (path, data) = harness
        .transcription_service
        .retained_audio(&t.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(path.as_str(), format!("{}/a.mp3", t.id));
    assert_eq!(&data[..], b"abc");
}

#[tokio::test]
async fn given_provider_failure_when_transcribing_then_nothing_is_stored() {
    let engine = StubEngine::new(Provider::OpenAi, rate_limited);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .retain_audio()
        .build();

    let result = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::RateLimited {
            retry_after_secs: Some(30),
            ..
        })
    ));
    assert!(harness.history.list().await.unwrap().is_empty());
    assert_eq!(harness.staged_files(), 0);
}

#[tokio::test]
async fn given_blank_provider_text_when_transcribing_then_reports_no_text() {
    let engine = StubEngine::new(Provider::OpenAi, blank);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .build();

    let result = harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &ProgressReporter::disabled())
        .await;

    assert!(matches!(result, Err(TranscriptionError::NoTextReturned(Provider::OpenAi))));
}

#[tokio::test]
async fn given_provider_without_engine_when_transcribing_then_reports_not_configured() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::Azure, "k")
        .build();

    let mut req = request("a.mp3", "audio/mpeg", b"abc");
    req.provider = Some(Provider::Azure);
    let result = harness
        .transcription_service
        .transcribe(req, &ProgressReporter::disabled())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ProviderNotConfigured(Provider::Azure))
    ));
}

#[tokio::test]
async fn given_progress_channel_when_transcribing_then_events_end_in_complete() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .build();
    let (tx, mut rx) = mpsc::channel(64);
    let reporter = ProgressReporter::new(tx);

    harness
        .transcription_service
        .transcribe(request("a.mp3", "audio/mpeg", b"abc"), &reporter)
        .await
        .unwrap();
    drop(reporter);

    let mut stages = Vec::new();
    while let Ok(event) = rx.try_recv() {
        stages.push(event.stage);
    }

    assert_eq!(stages.first(), Some(&ProgressStage::Validating));
    assert!(stages.contains(&ProgressStage::FileAccepted));
    assert!(stages.contains(&ProgressStage::AwaitingProvider));
    assert_eq!(stages.last(), Some(&ProgressStage::Complete));
}

#[tokio::test]
async fn given_failed_validation_when_reporting_then_phase_is_error() {
    let engine = StubEngine::new(Provider::OpenAi, english);
    let harness = HarnessBuilder::new()
        .engine(engine)
        .credential(Provider::OpenAi, "k")
        .build();
    let reporter = ProgressReporter::disabled();

    let _ = harness
        .transcription_service
        .transcribe(request("a.txt", "text/plain", b"abc"), &reporter)
        .await;

    assert_eq!(reporter.phase(), TranscriptionPhase::Error);
}
