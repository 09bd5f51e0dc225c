//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::ApiJson;
use crate::api::AppState;
use crate::domain::{Credentials, Registration};
use crate::errors::{AppResult, ErrorResponse};
use crate::services::AuthResponse;
use crate::types::Created;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register an account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = Registration,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Registration>,
) -> AppResult<Created<AuthResponse>> {
    let response = state.auth_service.register(payload).await?;
    Ok(Created(response))
}

/// Log in and receive a token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error or invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Credentials>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.auth_service.login(payload).await?;
    Ok(Json(response))
}
