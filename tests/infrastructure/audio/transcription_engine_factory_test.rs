use voxscribe::application::ports::TranscriptionError;
use voxscribe::domain::Provider;
use voxscribe::infrastructure::audio::{EngineEndpoints, TranscriptionEngineFactory};

#[test]
fn given_default_endpoints_when_creating_available_then_azure_is_skipped() {
    let engines =
        TranscriptionEngineFactory::create_available(&EngineEndpoints::default(), reqwest::Client::new());

    let providers: Vec<Provider> = engines.iter().map(|e| e.provider()).collect();
    assert_eq!(providers, vec![Provider::OpenAi, Provider::Gemini]);
}

#[test]
fn given_azure_without_deployment_when_creating_then_reports_not_configured() {
    let endpoints = EngineEndpoints {
        azure_endpoint: Some("https://example.openai.azure.com".to_string()),
        azure_deployment: Some("  ".to_string()),
        ..Default::default()
    };

    let result = TranscriptionEngineFactory::create(Provider::Azure, &endpoints, reqwest::Client::new());

    assert!(matches!(
        result,
        Err(TranscriptionError::ProviderNotConfigured(Provider::Azure))
    ));
}

#[test]
fn given_complete_azure_settings_when_creating_then_returns_azure_engine() {
    let endpoints = EngineEndpoints {
        azure_endpoint: Some("https://example.openai.azure.com".to_string()),
        azure_deployment: Some("whisper".to_string()),
        ..Default::default()
    };

    let engine =
        TranscriptionEngineFactory::create(Provider::Azure, &endpoints, reqwest::Client::new()).unwrap();

    assert_eq!(engine.provider(), Provider::Azure);
}
