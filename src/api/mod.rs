//! HTTP API for the clinic portal's text utilities.
//!
//! Routes are nested under `/api/` and pass through a middleware stack:
//! Panic guard → Rate limit → Access log → Handler.
//!
//! The router is composable — `api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
