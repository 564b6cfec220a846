//! Per-client rate limiting middleware.
//!
//! Sliding-window limits per client, configured through `ServerConfig`
//! (defaults: 120 requests per minute, 2000 per hour).

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Extract a rate-limit key from the request.
///
/// Prefers the last `X-Forwarded-For` hop, which the portal's proxy appends.
/// Earlier hops are client-supplied and ignored. Falls back to the peer
/// address, then a shared anonymous bucket.
fn rate_key(req: &Request<axum::body::Body>) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return format!("ip:{forwarded}");
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| format!("ip:{}", addr.ip()))
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Per-client rate limiting. Returns 429 if exceeded.
/// Accesses `ApiContext` from request extensions.
pub async fn limit(req: Request<axum::body::Body>, next: Next) -> Response {
    match limit_inner(req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn limit_inner(req: Request<axum::body::Body>, next: Next) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let key = rate_key(&req);

    // MutexGuard is !Send, drop it before .await
    {
        let mut limiter = ctx
            .rate_limiter
            .lock()
            .map_err(|_| ApiError::Internal("rate limiter lock".into()))?;

        limiter.check(&key).map_err(|retry_after| {
            tracing::warn!(client = %key, retry_after, "Rate limit exceeded");
            ApiError::RateLimited { retry_after }
        })?;
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn key_uses_last_forwarded_hop() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(rate_key(&req), "ip:10.0.0.2");
    }

    #[test]
    fn single_forwarded_hop_is_used() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        assert_eq!(rate_key(&req), "ip:203.0.113.7");
    }

    #[test]
    fn trailing_empty_hop_falls_back_to_peer() {
        let mut req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, ")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 5000))));
        assert_eq!(rate_key(&req), "ip:192.168.1.20");
    }

    #[test]
    fn key_falls_back_to_peer_address() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 5000))));
        assert_eq!(rate_key(&req), "ip:192.168.1.20");
    }

    #[test]
    fn key_without_client_info_is_anonymous() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(rate_key(&req), "anonymous");
    }

    #[test]
    fn blank_forwarded_header_is_ignored() {
        let req = Request::builder()
            .header("X-Forwarded-For", " ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(rate_key(&req), "anonymous");
    }
}
