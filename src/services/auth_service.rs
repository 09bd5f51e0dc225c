//! Authentication service - account registration, login and token checks.
//!
//! Password hashing lives in the domain `Password` value object; this
//! service only decides when to hash, verify and issue tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{Config, MSG_EMAIL_TAKEN};
use crate::domain::{Credentials, NewUser, Password, Registration, User, UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Returned by register and login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Signed HS256 token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign the caller in
    async fn register(&self, input: Registration) -> AppResult<AuthResponse>;

    /// Exchange credentials for a token
    async fn login(&self, input: Credentials) -> AppResult<AuthResponse>;

    /// Verify a token and extract its claims. Any failure is `InvalidToken`.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Token rejected");
        AppError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    fn respond(&self, user: User) -> AppResult<AuthResponse> {
        let token = generate_token(&user, &self.config)?;
        Ok(AuthResponse {
            token,
            user: UserResponse::from(user),
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, input: Registration) -> AppResult<AuthResponse> {
        input.validate()?;

        let role = match input.role.as_deref() {
            Some(role) => role
                .parse::<UserRole>()
                .map_err(|e| AppError::invalid_field("role", "invalid_enum_value", e))?,
            None => UserRole::default(),
        };

        if self.uow.users().find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Account registered");

        self.respond(user)
    }

    async fn login(&self, input: Credentials) -> AppResult<AuthResponse> {
        input.validate()?;

        let user = self.uow.users().find_by_email(&input.email).await?;

        // Verify against a dummy hash for unknown emails so both failures
        // take the same time.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(&input.password);

        match user {
            Some(user) if password_valid => self.respond(user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
