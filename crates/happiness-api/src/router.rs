//! Axum router construction for the survey API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so the survey frontend can call the API cross-origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the survey API.
///
/// The router includes:
/// - `GET /api/happiness/me` -- individual records
/// - `GET /api/happiness/all` -- aggregate records
/// - `POST /api/happiness` -- append an individual record
///
/// Unmatched paths get a JSON 404. CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/happiness", post(handlers::append_individual))
        .route("/api/happiness/me", get(handlers::list_individual))
        .route("/api/happiness/all", get(handlers::list_aggregate))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
