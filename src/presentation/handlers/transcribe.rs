use std::convert::Infallible;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::application::ports::ProgressReporter;
use crate::presentation::state::AppState;

use super::error_response::{
    ErrorResponse, error_response, transcription_error_body, transcription_error_response,
};
use super::upload_form::{UploadForm, api_key_from_headers};

const PROGRESS_BUFFER: usize = 64;

#[tracing::instrument(skip(state, headers, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let form = match UploadForm::read(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected transcription upload");
            return e.into_response();
        }
    };
    let request = form.into_request(api_key_from_headers(&headers));

    // Spawned so a dropped client connection does not abort the provider call.
    let service = Arc::clone(&state.transcription_service);
    let task = tokio::spawn(async move {
        service
            .transcribe(request, &ProgressReporter::disabled())
            .await
    });

    match task.await {
        Ok(Ok(transcription)) => (StatusCode::OK, Json(transcription)).into_response(),
        Ok(Err(e)) => transcription_error_response(&e),
        Err(e) => {
            tracing::error!(error = %e, "Transcription task failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to transcribe audio",
                Some(e.to_string()),
            )
        }
    }
}

fn json_event<T: Serialize>(name: &str, payload: &T) -> Event {
    Event::default()
        .event(name)
        .json_data(payload)
        .unwrap_or_else(|e| Event::default().event("error").data(e.to_string()))
}

/// Same upload contract as [`transcribe_handler`], answered as server-sent
/// events: `progress` events, then one `result` or `error`.
#[tracing::instrument(skip(state, headers, multipart))]
pub async fn transcribe_stream_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let form = match UploadForm::read(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected transcription upload");
            return e.into_response();
        }
    };
    let request = form.into_request(api_key_from_headers(&headers));

    let (tx, mut rx) = mpsc::channel(PROGRESS_BUFFER);
    let reporter = ProgressReporter::new(tx);
    let service = Arc::clone(&state.transcription_service);
    let task = tokio::spawn(async move { service.transcribe(request, &reporter).await });

    let sse_stream = async_stream::stream! {
        // Closes once the task and every reporter clone are gone.
        while let Some(event) = rx.recv().await {
            yield Ok::<_, Infallible>(json_event("progress", &event));
        }

        let outcome = match task.await {
            Ok(Ok(transcription)) => json_event("result", &transcription),
            Ok(Err(e)) => json_event("error", &transcription_error_body(&e)),
            Err(e) => json_event(
                "error",
                &ErrorResponse::new("Failed to transcribe audio", Some(e.to_string())),
            ),
        };
        yield Ok(outcome);
    };

    Sse::new(sse_stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
