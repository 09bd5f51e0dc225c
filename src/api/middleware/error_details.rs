//! Adds internal failure details to 500 bodies outside production.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::header::{CONTENT_LENGTH, CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::api::AppState;
use crate::errors::{ErrorDetails, ErrorResponse};

/// Upper bound on an error body we are willing to rewrite
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// Rewrite `{error}` into `{error, details}` for responses carrying
/// [`ErrorDetails`], unless the deployment is production.
pub async fn expose_error_details(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetails(details)) = response.extensions_mut().remove::<ErrorDetails>() else {
        return response;
    };

    if state.config.is_production() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let error = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => serde_json::from_slice::<serde_json::Value>(&bytes)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string)),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read error body");
            None
        }
    };

    let mut body = ErrorResponse::new(error.unwrap_or_else(|| "Internal server error".to_string()));
    body.details = Some(details);

    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.remove(CONTENT_TYPE);
    let rebuilt = Json(body).into_response();
    let (new_parts, new_body) = rebuilt.into_parts();
    parts.headers.extend(new_parts.headers);

    Response::from_parts(parts, new_body)
}
