use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    audio_handler, clear_history_handler, delete_history_entry_handler, delete_many_handler,
    export_entry_handler, export_many_handler, get_history_entry_handler, health_handler,
    list_history_handler, transcribe_handler, transcribe_stream_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart boundaries and the non-file fields.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = usize::try_from(state.transcription_service.max_file_size_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let upload_routes = Router::new()
        .route("/api/transcribe", post(transcribe_handler))
        .route("/api/transcribe/stream", post(transcribe_stream_handler))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/history",
            get(list_history_handler).delete(clear_history_handler),
        )
        .route("/api/history/delete", post(delete_many_handler))
        .route("/api/history/export", post(export_many_handler))
        .route(
            "/api/history/{id}",
            get(get_history_entry_handler).delete(delete_history_entry_handler),
        )
        .route("/api/history/{id}/export", get(export_entry_handler))
        .route("/api/audio/{id}", get(audio_handler))
        .merge(upload_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
