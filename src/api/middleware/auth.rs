//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};
use crate::services::AuthService;

/// Authenticated caller, taken from the token claims alone.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Resolve the caller from an `Authorization: Bearer <token>` header.
///
/// A missing or non-bearer header is `Unauthorized`; a token that fails
/// verification is `InvalidToken`.
pub fn authenticate(headers: &HeaderMap, auth: &dyn AuthService) -> AppResult<CurrentUser> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = auth.verify_token(token)?;

    Ok(CurrentUser {
        id: claims.id,
        email: claims.email,
        role: claims.role,
    })
}

/// Rejects unauthenticated requests and injects [`CurrentUser`] into the
/// request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_user = authenticate(request.headers(), state.auth_service.as_ref())?;

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{AuthResponse, Claims};
    use crate::domain::{Credentials, Registration};
    use async_trait::async_trait;
    use axum::http::HeaderValue;

    /// Accepts exactly one token
    struct FixedToken;

    #[async_trait]
    impl AuthService for FixedToken {
        async fn register(&self, _: Registration) -> AppResult<AuthResponse> {
            unreachable!()
        }

        async fn login(&self, _: Credentials) -> AppResult<AuthResponse> {
            unreachable!()
        }

        fn verify_token(&self, token: &str) -> AppResult<Claims> {
            if token == "good" {
                Ok(Claims {
                    id: Uuid::nil(),
                    email: "ada@example.com".to_string(),
                    role: UserRole::Employer,
                    iat: 0,
                    exp: i64::MAX,
                })
            } else {
                Err(AppError::InvalidToken)
            }
        }
    }

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        for value in [None, Some("good"), Some("Basic good"), Some("Bearer ")] {
            let err = authenticate(&headers(value), &FixedToken).unwrap_err();
            assert!(matches!(err, AppError::Unauthorized), "{value:?}");
        }
    }

    #[test]
    fn test_bad_token_is_invalid() {
        let err = authenticate(&headers(Some("Bearer bad")), &FixedToken).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_good_token_yields_claims() {
        let user = authenticate(&headers(Some("Bearer good")), &FixedToken).unwrap();
        assert_eq!(user.role, UserRole::Employer);
        assert_eq!(user.email, "ada@example.com");
    }
}
