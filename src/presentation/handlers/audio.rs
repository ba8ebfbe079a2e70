use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::domain::{AudioFormat, TranscriptionId};
use crate::presentation::state::AppState;

use super::error_response::staging_error_response;
use super::history::not_found;

pub async fn audio_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = TranscriptionId::from_string(id);
    match state.transcription_service.retained_audio(&id).await {
        Ok(Some((path, data))) => {
            let mime = AudioFormat::from_file_name(path.as_str())
                .map(|f| f.provider_mime())
                .unwrap_or("application/octet-stream");
            (
                StatusCode::OK,
                [(CONTENT_TYPE, HeaderValue::from_static(mime))],
                data,
            )
                .into_response()
        }
        Ok(None) => not_found(&id),
        Err(e) => staging_error_response(&e),
    }
}
