pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::extract::handlers as extract_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/extract", post(extract_handlers::handle_extract))
        .route(
            "/api/v1/extract/upload",
            post(extract_handlers::handle_extract_upload),
        )
        .route("/api/v1/export", post(export_handlers::handle_export))
        .with_state(state)
}
