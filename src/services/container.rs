//! Service Container - Centralized service access with parallel execution support.

use std::future::Future;
use std::sync::Arc;

use super::{
    ApplicationService, ApplicationWorkflow, AuthService, Authenticator, JobCatalog, JobService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn jobs(&self) -> Arc<dyn JobService>;

    fn applications(&self) -> Arc<dyn ApplicationService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    job_service: Arc<dyn JobService>,
    application_service: Arc<dyn ApplicationService>,
}

impl Services {
    /// Wire every service over one Unit of Work
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            job_service: Arc::new(JobCatalog::new(uow.clone())),
            application_service: Arc::new(ApplicationWorkflow::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn jobs(&self) -> Arc<dyn JobService> {
        self.job_service.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationService> {
        self.application_service.clone()
    }
}

/// Concurrent execution of independent operations.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Run two independent operations concurrently.
    ///
    /// Returns when both complete; the first error wins.
    ///
    /// # Example
    /// ```ignore
    /// let (page, total) = parallel::join2(
    ///     jobs.find_page(filter.clone(), offset, limit),
    ///     jobs.count(filter),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
