//! API middleware.

mod auth;
mod error_details;
mod rate_limit;

pub use auth::{auth_middleware, authenticate, CurrentUser};
pub use error_details::expose_error_details;
pub use rate_limit::{rate_limit_middleware, RateLimitError};
