//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod application_repository;
pub(crate) mod entities;
mod job_repository;
mod user_repository;

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

pub use application_repository::{ApplicationRepository, ApplicationStore};
pub use job_repository::{JobRepository, JobStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use application_repository::MockApplicationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use job_repository::MockJobRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Map a unique index violation to a conflict, anything else stays a
/// database error.
pub(crate) fn conflict_on_duplicate(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(message),
        _ => AppError::Database(err),
    }
}
