use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::services::TextExport;
use crate::domain::TranscriptionId;
use crate::presentation::state::AppState;

use super::error_response::{error_response, repository_error_response};
use super::history::{IdsRequest, not_found};

/// Quoted-string safe, ASCII only.
pub fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}

fn text_attachment(export: TextExport) -> Response {
    let disposition = HeaderValue::from_str(&attachment_disposition(&export.file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
            (CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response()
}

pub async fn export_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = TranscriptionId::from_string(id);
    match state.history_service.export_one(&id).await {
        Ok(Some(export)) => text_attachment(export),
        Ok(None) => not_found(&id),
        Err(e) => repository_error_response(&e),
    }
}

#[tracing::instrument(skip(state, request), fields(count = request.ids.len()))]
pub async fn export_many_handler(
    State(state): State<AppState>,
    Json(request): Json<IdsRequest>,
) -> Response {
    if request.ids.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No transcriptions selected", None);
    }

    match state
        .history_service
        .export_many(&request.transcription_ids())
        .await
    {
        Ok(Some(export)) => text_attachment(export),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "Transcription not found",
            Some("none of the requested ids are in history".to_string()),
        ),
        Err(e) => repository_error_response(&e),
    }
}
