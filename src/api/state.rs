//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::RateLimiter;
use crate::services::{ApplicationService, AuthService, JobService, ServiceContainer};

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub job_service: Arc<dyn JobService>,
    pub application_service: Arc<dyn ApplicationService>,
    /// Request counter behind the global rate limit
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        services: &dyn ServiceContainer,
        rate_limiter: Arc<dyn RateLimiter>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            job_service: services.jobs(),
            application_service: services.applications(),
            rate_limiter,
            config: Arc::new(config),
        }
    }
}
