use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use voxscribe::application::services::{
    HistoryService, TranscriptionOptions, TranscriptionService,
};
use voxscribe::infrastructure::audio::{SymphoniaAudioProbe, TranscriptionEngineFactory};
use voxscribe::infrastructure::observability::{TracingConfig, init_tracing};
use voxscribe::infrastructure::persistence::HistoryRepositoryFactory;
use voxscribe::infrastructure::storage::LocalStagingStore;
use voxscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(
        TracingConfig::new(
            environment.as_str(),
            settings.logging.enable_json,
            &settings.logging.level,
        ),
        settings.server.port,
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.transcription.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let engines = TranscriptionEngineFactory::create_available(
        &settings.transcription.engine_endpoints(),
        client,
    );

    let credentials = settings.configured_credentials();
    let default_provider = settings.transcription.provider;
    if !credentials.contains_key(&default_provider) {
        tracing::warn!(
            provider = %default_provider,
            "No server-side API key for the default provider; requests must supply one"
        );
    }

    let staging_store = Arc::new(
        LocalStagingStore::new(settings.storage.local_path.clone())
            .context("Failed to initialise staging directory")?,
    );

    let history = HistoryRepositoryFactory::create(
        settings.history.backend,
        settings.history.path.clone(),
        settings.history.capacity,
    );

    let transcription_service = Arc::new(TranscriptionService::new(
        engines,
        credentials,
        staging_store.clone(),
        Arc::clone(&history),
        Arc::new(SymphoniaAudioProbe),
        TranscriptionOptions {
            default_provider,
            max_file_size_bytes: settings.max_file_size_bytes(),
            retain_audio: settings.storage.retain_audio,
        },
    ));

    let history_service = Arc::new(HistoryService::new(history, staging_store));

    let state = AppState {
        transcription_service,
        history_service,
    };

    let router = create_router(state);

    let ip = settings
        .server
        .host
        .parse()
        .context("Invalid server.host")?;
    let addr = SocketAddr::new(ip, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
