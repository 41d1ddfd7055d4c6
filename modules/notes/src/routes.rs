//! Axum route handlers for the notes REST API.

use crate::db::Database;
use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Json, Response};
use notes_types::*;
use std::sync::Arc;
use std::time::Instant;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
    pub db: Database,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            start_time: Instant::now(),
        }
    }
}

// GET /api/notes
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.db.list_notes()?;
    Ok(Json(notes))
}

// GET /api/notes/:id
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    // An id that can't even be decoded is as unknown as any other
    let Ok(Path(id)) = id else {
        return Err(ApiError::NotFound);
    };

    match state.db.get_note(&id)? {
        Some(note) => Ok(Json(note)),
        None => Err(ApiError::NotFound),
    }
}

// POST /api/notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let note = state.db.insert_note(&req)?;
    log::info!("[NOTES] Created note {}", note.id);

    Ok((StatusCode::CREATED, Json(note)))
}

// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Ok(Path(id)) = id else {
        return Ok(StatusCode::NO_CONTENT);
    };

    if state.db.delete_note(&id)? {
        log::info!("[NOTES] Deleted note {}", id);
    } else {
        log::debug!("[NOTES] Delete of absent note {} ignored", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/health
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let notes = state.db.count_notes()?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "version": VERSION,
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "notes": notes,
    })))
}

pub async fn unknown_endpoint() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("unknown endpoint")))
}

/// Logs method, path, status and latency of every request.
pub async fn request_logger(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let resp = next.run(req).await;

    log::info!(
        "[HTTP] {} {} -> {} ({} ms)",
        method,
        path,
        resp.status().as_u16(),
        started.elapsed().as_millis()
    );
    resp
}
