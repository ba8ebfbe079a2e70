use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub credential_configured: bool,
    pub timestamp: DateTime<Utc>,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let provider = state.transcription_service.default_provider();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            provider: provider.as_str().to_string(),
            credential_configured: state.transcription_service.credential_configured(provider),
            timestamp: Utc::now(),
        }),
    )
}
