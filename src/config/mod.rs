//! Application configuration module
//!
//! Environment-driven settings plus the constants shared by validation,
//! pagination, authentication and rate limiting.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
