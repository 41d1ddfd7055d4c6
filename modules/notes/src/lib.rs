//! Notes Service — a small REST API over a SQLite note store.
//!
//! Routes:
//! - `GET    /api/notes`      list all notes
//! - `GET    /api/notes/:id`  fetch one note (404 when absent)
//! - `POST   /api/notes`      create a note (400 without `content`)
//! - `DELETE /api/notes/:id`  delete a note (always 204)
//! - `GET    /api/health`     liveness and note count

pub mod config;
pub mod db;
pub mod error;
pub mod routes;

pub use config::Config;
pub use db::{Database, StoreError};
pub use routes::AppState;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Build the application router around shared state.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = tower_http::cors::CorsLayer::permissive();

    Router::new()
        .route(
            "/api/notes",
            get(routes::list_notes).post(routes::create_note),
        )
        .route(
            "/api/notes/:id",
            get(routes::get_note).delete(routes::delete_note),
        )
        .route("/api/health", get(routes::health))
        .fallback(routes::unknown_endpoint)
        .with_state(state)
        .layer(axum::middleware::from_fn(routes::request_logger))
        .layer(cors)
}
