// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// API routes, plus the frontend at `/` when `static_dir` is given.
pub fn create_router(static_dir: Option<&Path>) -> Router<SharedState> {
    let router = Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}
