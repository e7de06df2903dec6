// src/api/router.rs
// HTTP router composition for the relay endpoints

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::chat::send_message_handler;
use super::handlers::health_handler;
use crate::state::AppState;

/// Main HTTP router. The web client is served from another origin, so the
/// endpoint is open to all origins.
pub fn http_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health
        .route("/health", get(health_handler))

        // Chat relay
        .route("/send-message", post(send_message_handler))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
