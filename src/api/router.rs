//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Extension(ApiContext) → 2. Panic guard → 3. Rate limiter → 4. Access log

use std::any::Any;

use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config::ServerConfig;

/// Build the API router from server settings.
pub fn api_router(config: &ServerConfig) -> Router {
    build_router(ApiContext::new(config), config.max_body_bytes)
}

fn build_router(ctx: ApiContext, max_body_bytes: usize) -> Router {
    // Layers are applied from bottom (innermost) to top (outermost).
    // Extension must be outermost so middleware can extract ApiContext.
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/clean-text", post(endpoints::clean_text::clean))
        .route("/clean-text/rules", get(endpoints::clean_text::rules))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::rate::limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::Extension(ctx));

    Router::new().nest("/api", api)
}

/// Turn a handler panic into a 500 with the generic error body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
