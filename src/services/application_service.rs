//! Application workflow - applying to jobs and moving applications
//! through review.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{MSG_ALREADY_APPLIED, MSG_INVALID_STATUS};
use crate::domain::{
    ApplicationDraft, ApplicationStatus, ApplicationWithJob, Application, StatusChange,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Application service trait for dependency injection.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Apply `user_id` to `job_id`. One application per candidate and job.
    async fn apply(&self, job_id: Uuid, user_id: Uuid, draft: ApplicationDraft) -> AppResult<ApplicationWithJob>;

    /// The caller's applications, newest first
    async fn list_mine(&self, user_id: Uuid) -> AppResult<Vec<ApplicationWithJob>>;

    /// Overwrite the status. Any status may follow any other.
    async fn set_status(&self, id: Uuid, change: StatusChange) -> AppResult<Application>;
}

/// Concrete implementation of ApplicationService using Unit of Work.
pub struct ApplicationWorkflow<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ApplicationWorkflow<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ApplicationService for ApplicationWorkflow<U> {
    async fn apply(&self, job_id: Uuid, user_id: Uuid, draft: ApplicationDraft) -> AppResult<ApplicationWithJob> {
        let job = self.uow.jobs().find_by_id(job_id).await?.ok_or_not_found("Job")?;

        let applications = self.uow.applications();

        // Advisory; the unique index settles concurrent submissions.
        if applications
            .find_by_candidate_and_job(user_id, job_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(MSG_ALREADY_APPLIED));
        }

        let application = applications.create(user_id, job_id, draft.cover_note).await?;

        tracing::info!(
            application_id = %application.id,
            job_id = %job_id,
            user_id = %user_id,
            "Application submitted"
        );

        Ok(ApplicationWithJob { application, job })
    }

    async fn list_mine(&self, user_id: Uuid) -> AppResult<Vec<ApplicationWithJob>> {
        self.uow.applications().list_for_candidate(user_id).await
    }

    async fn set_status(&self, id: Uuid, change: StatusChange) -> AppResult<Application> {
        let status: ApplicationStatus = change
            .status
            .parse()
            .map_err(|_| AppError::BadRequest(MSG_INVALID_STATUS.to_string()))?;

        let application = self
            .uow
            .applications()
            .update_status(id, status)
            .await?
            .ok_or_not_found("Application")?;

        tracing::info!(application_id = %id, status = %status, "Application status changed");

        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Job, JobType};
    use crate::infra::{MockApplicationRepository, MockJobRepository};
    use crate::services::testing::TestUnitOfWork;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn job(id: Uuid) -> Job {
        Job {
            id,
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            job_type: JobType::Contract,
            salary: Some("90k".to_string()),
            description: "Build the hiring platform".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn application(user_id: Uuid, job_id: Uuid, status: ApplicationStatus) -> Application {
        Application {
            id: Uuid::new_v4(),
            user_id,
            job_id,
            cover_note: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(jobs: MockJobRepository, applications: MockApplicationRepository) -> ApplicationWorkflow<TestUnitOfWork> {
        ApplicationWorkflow::new(Arc::new(TestUnitOfWork::with_jobs_and_applications(
            jobs,
            applications,
        )))
    }

    #[tokio::test]
    async fn test_apply_to_missing_job() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id().returning(|_| Ok(None));
        let mut applications = MockApplicationRepository::new();
        applications.expect_create().never();

        let err = service(jobs, applications)
            .apply(Uuid::new_v4(), Uuid::new_v4(), ApplicationDraft::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Job not found");
    }

    #[tokio::test]
    async fn test_apply_twice_conflicts() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id().returning(|id| Ok(Some(job(id))));
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_candidate_and_job()
            .returning(|user_id, job_id| Ok(Some(application(user_id, job_id, ApplicationStatus::Pending))));
        applications.expect_create().never();

        let err = service(jobs, applications)
            .apply(Uuid::new_v4(), Uuid::new_v4(), ApplicationDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Already applied to this job"));
    }

    #[tokio::test]
    async fn test_apply_race_lost_at_insert_conflicts() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id().returning(|id| Ok(Some(job(id))));
        let mut applications = MockApplicationRepository::new();
        applications.expect_find_by_candidate_and_job().returning(|_, _| Ok(None));
        applications
            .expect_create()
            .returning(|_, _, _| Err(AppError::conflict("Already applied to this job")));

        let err = service(jobs, applications)
            .apply(Uuid::new_v4(), Uuid::new_v4(), ApplicationDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_apply_returns_pending_with_job() {
        let job_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id().with(eq(job_id)).returning(|id| Ok(Some(job(id))));
        let mut applications = MockApplicationRepository::new();
        applications.expect_find_by_candidate_and_job().returning(|_, _| Ok(None));
        applications
            .expect_create()
            .with(eq(user_id), eq(job_id), eq(Some("Hire me".to_string())))
            .returning(|user_id, job_id, cover_note| {
                let mut created = application(user_id, job_id, ApplicationStatus::Pending);
                created.cover_note = cover_note;
                Ok(created)
            });

        let result = service(jobs, applications)
            .apply(
                job_id,
                user_id,
                ApplicationDraft {
                    cover_note: Some("Hire me".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.application.status, ApplicationStatus::Pending);
        assert_eq!(result.job.id, job_id);
        assert_eq!(result.application.cover_note.as_deref(), Some("Hire me"));
    }

    #[tokio::test]
    async fn test_set_status_is_case_sensitive() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_update_status().never();

        let err = service(MockJobRepository::new(), applications)
            .set_status(
                Uuid::new_v4(),
                StatusChange {
                    status: "pending".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Invalid status");
    }

    #[tokio::test]
    async fn test_set_status_missing_application() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_update_status().returning(|_, _| Ok(None));

        let err = service(MockJobRepository::new(), applications)
            .set_status(
                Uuid::new_v4(),
                StatusChange {
                    status: "Reviewed".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Application not found");
    }

    #[tokio::test]
    async fn test_set_status_allows_any_transition() {
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_update_status()
            .with(mockall::predicate::always(), eq(ApplicationStatus::Pending))
            .returning(|_, status| Ok(Some(application(Uuid::new_v4(), Uuid::new_v4(), status))));

        let updated = service(MockJobRepository::new(), applications)
            .set_status(
                Uuid::new_v4(),
                StatusChange {
                    status: "Pending".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Pending);
    }
}
