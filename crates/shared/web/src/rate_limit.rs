//! Per-client fixed-window rate limiting.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::cache::Cache;

/// Limit applied to one group of routes.
#[derive(Clone)]
pub struct RateLimit {
    pub cache: Arc<Cache>,
    pub max_requests: u64,
    pub window_seconds: u64,
}

impl RateLimit {
    pub fn new(cache: Arc<Cache>, max_requests: u64, window_seconds: u64) -> Self {
        Self {
            cache,
            max_requests,
            window_seconds,
        }
    }
}

/// Counts requests per path and client IP. A cache failure denies the request.
pub async fn rate_limit_middleware(
    State(limit): State<RateLimit>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(request.headers(), connect_info.map(|ci| ci.0));
    let identifier = format!("{}:{}", request.uri().path(), ip);

    let count = match limit
        .cache
        .check_rate_limit(&identifier, limit.max_requests, limit.window_seconds)
        .await
    {
        Ok((count, true)) => count,
        Ok((_, false)) => {
            // Remaining window when Redis reports one
            let retry_after = match limit.cache.get_rate_limit_ttl(&identifier).await {
                Ok(Some(ttl)) => ttl.unsigned_abs(),
                _ => limit.window_seconds,
            };
            return rate_limit_exceeded_response(limit.max_requests, retry_after);
        }
        Err(e) => {
            warn!("Rate limit check failed for {}: {}", identifier, e);
            return rate_limit_exceeded_response(limit.max_requests, limit.window_seconds);
        }
    };

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit.max_requests));
    headers.insert(
        "X-RateLimit-Remaining",
        HeaderValue::from(limit.max_requests.saturating_sub(count)),
    );

    response
}

/// First `X-Forwarded-For` hop, then `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(ip) = headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return ip.to_string();
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        return real_ip.trim().to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_exceeded_response(max_requests: u64, retry_after: u64) -> Response {
    let body = json!({
        "error": {
            "code": "TOO_MANY_REQUESTS",
            "message": "Too many requests. Please try again later."
        }
    });
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    let headers = response.headers_mut();
    headers.insert("Retry-After", HeaderValue::from(retry_after));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
    headers.insert("X-RateLimit-Limit", HeaderValue::from(max_requests));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("X-Real-IP", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers, None), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_fallbacks() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "192.0.2.10:4567".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer)), "192.0.2.10");
        assert_eq!(client_ip(&headers, None), "unknown");

        headers.insert("X-Real-IP", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers, Some(peer)), "198.51.100.2");
    }

    #[test]
    fn test_exceeded_response_headers() {
        let response = rate_limit_exceeded_response(10, 60);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "60");
        assert_eq!(response.headers()["X-RateLimit-Remaining"], "0");
        assert_eq!(response.headers()["X-RateLimit-Limit"], "10");
    }
}
