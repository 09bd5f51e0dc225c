//! Global rate limiting middleware.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::RETRY_AFTER, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::net::SocketAddr;

use crate::api::AppState;
use crate::config::MSG_TOO_MANY_REQUESTS;
use crate::errors::ErrorResponse;

const X_RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
const X_RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Rejection once a client exhausts its window
#[derive(Debug)]
pub struct RateLimitError {
    pub limit: u64,
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from(self.retry_after));
        headers.insert(X_RATE_LIMIT_LIMIT, HeaderValue::from(self.limit));
        headers.insert(X_RATE_LIMIT_REMAINING, HeaderValue::from_static("0"));

        (
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            Json(ErrorResponse::new(MSG_TOO_MANY_REQUESTS)),
        )
            .into_response()
    }
}

/// Client identifier: first X-Forwarded-For hop, then X-Real-IP, then the
/// peer address.
fn client_identifier(request: &Request) -> String {
    let header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(ip) = header("x-forwarded-for").and_then(|f| f.split(',').next()) {
        return ip.trim().to_string();
    }

    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.to_string();
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    "unknown".to_string()
}

/// Limits every client to `rate_limit_requests` per
/// `rate_limit_window_seconds`.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let limit = state.config.rate_limit_requests;
    let window = state.config.rate_limit_window_seconds;
    let client_id = client_identifier(&request);

    let rejection = RateLimitError {
        limit,
        retry_after: window,
    };

    let (count, allowed) = match state.rate_limiter.check(&client_id, limit, window).await {
        Ok(result) => result,
        Err(e) => {
            // Fail closed: an unreachable counter must not lift the limit
            tracing::error!(error = %e, "Rate limit check failed, denying request");
            return Err(rejection);
        }
    };

    if !allowed {
        tracing::warn!(client = %client_id, count = count, "Rate limit exceeded");
        return Err(rejection);
    }

    let mut response = next.run(request).await;

    let remaining = limit.saturating_sub(count);
    response
        .headers_mut()
        .insert(X_RATE_LIMIT_LIMIT, HeaderValue::from(limit));
    response
        .headers_mut()
        .insert(X_RATE_LIMIT_REMAINING, HeaderValue::from(remaining));

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_rate_limit_error_response() {
        let response = RateLimitError {
            limit: 100,
            retry_after: 900,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["retry-after"], "900");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
    }

    #[test]
    fn test_client_identifier_precedence() {
        let request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .header("X-Real-IP", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_identifier(&request), "203.0.113.7");

        let request = Request::builder()
            .header("X-Real-IP", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_identifier(&request), "198.51.100.2");

        let mut request = Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_identifier(&request), "192.0.2.1");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_identifier(&request), "unknown");
    }
}
