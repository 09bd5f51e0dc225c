//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and repositories. Each is exposed as a
//! trait so handlers depend on the abstraction, with a Unit of Work backed
//! implementation.

mod application_service;
mod auth_service;
pub mod container;
mod job_service;

pub use container::{parallel, ServiceContainer, Services};

pub use application_service::{ApplicationService, ApplicationWorkflow};
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims};
pub use job_service::{JobCatalog, JobService};

/// Unit of Work over repository mocks for service unit tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::infra::{
        ApplicationRepository, JobRepository, MockApplicationRepository, MockJobRepository,
        MockUserRepository, UnitOfWork, UserRepository,
    };

    pub struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
        jobs: Arc<MockJobRepository>,
        applications: Arc<MockApplicationRepository>,
    }

    impl TestUnitOfWork {
        pub fn new(
            users: MockUserRepository,
            jobs: MockJobRepository,
            applications: MockApplicationRepository,
        ) -> Self {
            Self {
                users: Arc::new(users),
                jobs: Arc::new(jobs),
                applications: Arc::new(applications),
            }
        }

        pub fn with_users(users: MockUserRepository) -> Self {
            Self::new(users, MockJobRepository::new(), MockApplicationRepository::new())
        }

        pub fn with_jobs(jobs: MockJobRepository) -> Self {
            Self::new(MockUserRepository::new(), jobs, MockApplicationRepository::new())
        }

        pub fn with_jobs_and_applications(
            jobs: MockJobRepository,
            applications: MockApplicationRepository,
        ) -> Self {
            Self::new(MockUserRepository::new(), jobs, applications)
        }
    }

    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn jobs(&self) -> Arc<dyn JobRepository> {
            self.jobs.clone()
        }

        fn applications(&self) -> Arc<dyn ApplicationRepository> {
            self.applications.clone()
        }
    }
}
