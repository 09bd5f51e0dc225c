//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::validate_role;
use crate::config::{ROLE_CANDIDATE, ROLE_EMPLOYER};

/// Account roles. New roles are added as variants; nothing in the core
/// branches on "is employer" for authorization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Candidate,
    Employer,
}

impl UserRole {
    pub const VALUES: [&'static str; 2] = [ROLE_CANDIDATE, ROLE_EMPLOYER];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Candidate => ROLE_CANDIDATE,
            UserRole::Employer => ROLE_EMPLOYER,
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_CANDIDATE => Ok(UserRole::Candidate),
            ROLE_EMPLOYER => Ok(UserRole::Employer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account to be persisted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Registration input
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Registration {
    /// Display name (minimum 2 characters)
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Email address, unique across accounts
    #[validate(email(message = "Invalid email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "s3cret!", min_length = 6)]
    pub password: String,
    /// Role, defaults to candidate
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "employer")]
    pub role: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Credentials {
    #[validate(email(message = "Invalid email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "s3cret!")]
    pub password: String,
}

/// Public user projection (never carries the password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Poster annotation attached to job views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Poster {
    #[schema(example = "Acme Hiring")]
    pub name: String,
    #[schema(example = "jobs@acme.example")]
    pub email: String,
}

impl From<User> for Poster {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_strict() {
        assert_eq!("candidate".parse::<UserRole>(), Ok(UserRole::Candidate));
        assert_eq!("employer".parse::<UserRole>(), Ok(UserRole::Employer));
        assert!("Employer".parse::<UserRole>().is_err());
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Employer).unwrap(), "\"employer\"");
        assert_eq!(UserRole::default(), UserRole::Candidate);
    }

    #[test]
    fn test_registration_validation() {
        let ok = Registration {
            name: "Al".to_string(),
            email: "al@example.com".to_string(),
            password: "123456".to_string(),
            role: None,
        };
        assert!(ok.validate().is_ok());

        let bad = Registration {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            role: Some("admin".to_string()),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("role"));
    }

    #[test]
    fn test_registration_missing_fields_deserialize_to_defaults() {
        let registration: Registration = serde_json::from_str("{}").unwrap();
        assert!(registration.validate().is_err());
        assert!(registration.role.is_none());
    }
}
