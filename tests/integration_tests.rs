//! Integration tests for the HTTP surface of the relay
//!
//! These tests verify:
//! - Route registration
//! - Security and caching headers on every response
//! - CORS configuration
//! - Stats reflecting relay state

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use coinrace::{config::Config, routes, state::AppState};
use serde_json::Value;

/// Helper to create a test server with the full app configuration
fn create_test_server() -> (TestServer, AppState) {
    let state = AppState::new(Config::default());
    let app = routes::build_router(state.clone());
    (TestServer::new(app).unwrap(), state)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_root_redirects_to_client() {
    let (server, _) = create_test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/public/index.html"
    );
}

#[tokio::test]
async fn test_unknown_route_is_plain_404() {
    let (server, _) = create_test_server();

    let response = server.get("/definitely/not/here").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Not Found");
}

#[tokio::test]
async fn test_security_headers_on_every_route() {
    let (server, _) = create_test_server();

    for path in ["/health", "/api/stats", "/missing"] {
        let response = server.get(path).await;
        let headers = response.headers();

        assert_eq!(
            headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff",
            "{}",
            path
        );
        assert_eq!(headers.get("x-powered-by").unwrap(), "PHP 7.4.3", "{}", path);
        assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache", "{}", path);
    }
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (server, _) = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://somewhere.example"),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_stats_follow_connections() {
    let (server, state) = create_test_server();

    let json: Value = server.get("/api/stats").await.json();
    assert_eq!(json["participants"], 0);
    assert_eq!(json["available_colors"], 6);

    state.game_manager.write().await.connect("abc").unwrap();

    let json: Value = server.get("/api/stats").await.json();
    assert_eq!(json["participants"], 1);
    assert_eq!(json["players"], 0);
    assert_eq!(json["available_colors"], 5);
}

#[tokio::test]
async fn test_websocket_route_requires_upgrade() {
    let (server, _) = create_test_server();

    let response = server.get("/ws").await;

    assert!(response.status_code().is_client_error());
}
