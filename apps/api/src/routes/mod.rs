pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::document::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route(
            "/api/v1/documents/extract",
            post(handlers::handle_extract),
        )
        .route(
            "/api/v1/documents/candidate",
            post(handlers::handle_candidate),
        )
        .route("/api/v1/documents/merge", post(handlers::handle_merge))
        .route(
            "/api/v1/documents/serialize",
            post(handlers::handle_serialize),
        )
        .route("/api/v1/documents/tags", post(handlers::handle_tags))
        .fallback(not_found)
        .with_state(state)
}
