//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Unit of Work giving services one handle on all repositories
//! - Request rate limiting (Redis or in-process)

pub mod db;
pub mod rate_limit;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use rate_limit::{InMemoryRateLimiter, RateLimiter, RedisRateLimiter};
pub use repositories::{
    ApplicationRepository, ApplicationStore, JobRepository, JobStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockApplicationRepository, MockJobRepository, MockUserRepository};
