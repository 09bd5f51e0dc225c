//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories so services depend on a single
//! abstraction instead of one handle per table.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    ApplicationRepository, ApplicationStore, JobRepository, JobStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn jobs(&self) -> Arc<dyn JobRepository>;

    fn applications(&self) -> Arc<dyn ApplicationRepository>;
}

/// Concrete implementation of UnitOfWork over one connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    job_repo: Arc<JobStore>,
    application_repo: Arc<ApplicationStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            job_repo: Arc::new(JobStore::new(db.clone())),
            application_repo: Arc::new(ApplicationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn jobs(&self) -> Arc<dyn JobRepository> {
        self.job_repo.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.application_repo.clone()
    }
}
