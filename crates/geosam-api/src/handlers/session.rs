use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{ResetResponse, SessionResponse};
use crate::state::AppState;

pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse { results: session.results.clone(), map_visible: session.map_visible })
}

/// Clear the results and return the UI to the initial input screen.
pub async fn reset_session(State(state): State<Arc<AppState>>) -> Json<ResetResponse> {
    let mut session = state.session.lock().await;
    session.reset();
    tracing::info!("Session reset");
    Json(ResetResponse::done())
}
