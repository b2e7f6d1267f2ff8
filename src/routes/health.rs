use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};

use crate::state::AppState;

/// Root path - redirect to the browser client
///
/// # Returns
///
/// Redirect to /public/index.html
pub async fn root() -> Redirect {
    Redirect::to("/public/index.html")
}

/// Health check endpoint
///
/// # Returns
///
/// JSON response with status
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// Current relay statistics
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let manager = state.game_manager.read().await;
    Json(manager.get_stats())
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
