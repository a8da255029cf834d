use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, get_service, MethodRouter},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{DocumentStore, Source};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

#[derive(Debug, Deserialize)]
pub struct SourceQuery {
    pub source: Option<String>,
}

impl SourceQuery {
    /// Missing and unrecognized identifiers both land on the default source.
    fn resolve(&self) -> Source {
        Source::parse(self.source.as_deref().unwrap_or_default())
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// GET /api/data: return the stored document verbatim, or `{}` when the
/// source has never been written. A read creates nothing on disk.
async fn read_document(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state
        .store
        .read(query.resolve())
        .await
        .map_err(|e| ApiError(e.to_string()))?
        .unwrap_or_else(|| "{}".to_string());
    Ok(([(header::CONTENT_TYPE, "application/json")], document))
}

/// POST /api/data: validate the body as JSON and replace the whole
/// document. Success is only reported once the document is fully stored.
async fn write_document(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .store
        .write(query.resolve(), &body)
        .await
        .map_err(|e| ApiError(e.to_string()))?;
    Ok(Json(serde_json::json!({"status": "success"})))
}

/// Non-GET requests outside the API surface.
async fn unmatched() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Build the full application router: the data endpoint, health, and a
/// static-file fallback for everything else under GET.
pub fn build_router(state: AppState, static_dir: &str, cors: CorsLayer) -> Router {
    let static_assets =
        ServeDir::new(static_dir).fallback(ServeFile::new(format!("{static_dir}/index.html")));
    // GET elsewhere serves the frontend; any other method is a plain 404.
    let static_fallback: MethodRouter = get_service(static_assets).fallback(unmatched);

    Router::new()
        .route("/health", get(health))
        .route("/api/data", get(read_document).post(write_document))
        .fallback_service(static_fallback)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
