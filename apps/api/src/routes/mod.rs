pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::{json_error_responses, panic_response};
use crate::extraction::handlers;
use crate::state::AppState;

/// Method and path of every registered route, logged at start-up.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET|POST", "/health"),
    ("POST", "/"),
    ("POST", "/extract-resume"),
    ("POST", "/analyze-completeness"),
    ("POST", "/test-post"),
    ("POST", "/extract-resume-debug"),
];

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route(
            "/health",
            get(health::health_handler).post(health::health_handler),
        )
        // Extraction
        .route("/", post(handlers::handle_extract_resume))
        .route("/extract-resume", post(handlers::handle_extract_resume))
        .route(
            "/analyze-completeness",
            post(handlers::handle_analyze_completeness),
        )
        // Diagnostics
        .route("/test-post", post(handlers::handle_test_post))
        .route(
            "/extract-resume-debug",
            post(handlers::handle_extract_resume_debug),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(json_error_responses))
        .with_state(state)
}

/// Local wall-clock time as ISO-8601 without an offset, e.g.
/// `2024-03-01T09:15:02.123456`.
pub fn local_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
