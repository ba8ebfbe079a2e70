use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, HistoryQuery, TranscriptionId};
use crate::presentation::state::AppState;

use super::error_response::{error_response, repository_error_response};

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub search: Option<String>,
    pub language: Option<String>,
    pub range: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl HistoryParams {
    pub fn into_query(self) -> Result<HistoryQuery, String> {
        let range = match self.range.as_deref().map(str::trim).unwrap_or("all") {
            "" | "all" => DateRange::All,
            "today" => DateRange::Today,
            "yesterday" => DateRange::Yesterday,
            "week" => DateRange::Week,
            "month" => DateRange::Month,
            "custom" => DateRange::Custom {
                start: self.start,
                end: self.end,
            },
            other => {
                return Err(format!(
                    "Invalid range: {}. Expected: all, today, yesterday, week, month, or custom",
                    other
                ));
            }
        };

        Ok(HistoryQuery {
            search: self.search,
            language: self.language,
            range,
            offset: self.offset.unwrap_or(0),
            limit: self.limit,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

impl IdsRequest {
    pub fn transcription_ids(&self) -> Vec<TranscriptionId> {
        self.ids.iter().map(TranscriptionId::from_string).collect()
    }
}

#[derive(Serialize)]
pub struct DeleteManyResponse {
    pub deleted: usize,
}

#[tracing::instrument(skip(state))]
pub async fn list_history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(reason) => {
            return error_response(StatusCode::BAD_REQUEST, "Invalid history query", Some(reason));
        }
    };

    match state.history_service.query(&query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => repository_error_response(&e),
    }
}

pub async fn get_history_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = TranscriptionId::from_string(id);
    match state.history_service.get(&id).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => not_found(&id),
        Err(e) => repository_error_response(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_history_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = TranscriptionId::from_string(id);
    match state.history_service.remove(&id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(&id),
        Err(e) => repository_error_response(&e),
    }
}

#[tracing::instrument(skip(state, request), fields(count = request.ids.len()))]
pub async fn delete_many_handler(
    State(state): State<AppState>,
    Json(request): Json<IdsRequest>,
) -> Response {
    match state
        .history_service
        .remove_many(&request.transcription_ids())
        .await
    {
        Ok(deleted) => (StatusCode::OK, Json(DeleteManyResponse { deleted })).into_response(),
        Err(e) => repository_error_response(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn clear_history_handler(State(state): State<AppState>) -> Response {
    match state.history_service.clear().await {
        Ok(()) => {
            tracing::info!("History cleared");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => repository_error_response(&e),
    }
}

pub(super) fn not_found(id: &TranscriptionId) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "Transcription not found",
        Some(format!("no history entry with id {}", id)),
    )
}
