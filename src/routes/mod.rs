pub mod health;
pub mod websocket;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{middleware::security_headers, state::AppState};

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();

    // Browser clients may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and root
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api/stats", get(health::stats))
        // WebSocket
        .route("/ws", get(websocket::websocket_handler))
        // Static files for the browser client
        .nest_service("/public", ServeDir::new(public_dir))
        .fallback(health::not_found)
        .with_state(state)
        // Add middleware layers (applied in reverse order)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(
                    security_headers::security_headers_middleware,
                ))
                .layer(cors),
        )
}
