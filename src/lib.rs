// Board model, shared state and connection lifecycle
pub mod core;

// Validation boundary and movement planning
pub mod services;

// Wire messages
pub mod models;

// HTTP and WebSocket routes
pub mod routes;

// Middleware
pub mod middleware;

// Configuration
pub mod config;

// Error types
pub mod error;

// Application state
pub mod state;
