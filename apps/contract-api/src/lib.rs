//! Contract API library
//!
//! Exposes the router separately from the binary so integration tests can
//! drive it in-process.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use state::AppState;

/// Build the API router over shared application state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Contract lifecycle
        .route("/api/contracts", post(handlers::create_contract))
        .route("/api/contracts/:id", get(handlers::get_contract))
        .route("/api/contracts/:id/content", put(handlers::save_content))
        .route("/api/contracts/:id/status", post(handlers::update_status))
        // Import and clause-to-canvas sync
        .route("/api/contracts/:id/import", post(handlers::import_text))
        .route("/api/contracts/:id/sync", post(handlers::sync_canvas))
        // Clauses and audit
        .route(
            "/api/contracts/:id/clauses",
            get(handlers::list_clauses).put(handlers::replace_clauses),
        )
        .route("/api/contracts/:id/audit", get(handlers::audit_log))
        .with_state(state)
}
