//! Application persistence.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::conflict_on_duplicate;
use super::entities::{application, job};
use crate::config::MSG_ALREADY_APPLIED;
use crate::domain::{Application, ApplicationStatus, ApplicationWithJob, Job};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Application repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_candidate_and_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<Option<Application>>;

    /// Insert a Pending application. A second application for the same
    /// candidate and job is a conflict.
    async fn create(&self, user_id: Uuid, job_id: Uuid, cover_note: Option<String>) -> AppResult<Application>;

    /// The candidate's applications, newest first, each with its job
    async fn list_for_candidate(&self, user_id: Uuid) -> AppResult<Vec<ApplicationWithJob>>;

    /// Overwrite the status. `None` when the application does not exist.
    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> AppResult<Option<Application>>;
}

/// SeaORM-backed [`ApplicationRepository`]
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn find_by_candidate_and_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<Option<Application>> {
        let result = application::Entity::find()
            .filter(application::Column::UserId.eq(user_id))
            .filter(application::Column::JobId.eq(job_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Application::from))
    }

    async fn create(&self, user_id: Uuid, job_id: Uuid, cover_note: Option<String>) -> AppResult<Application> {
        let now = chrono::Utc::now();
        let active_model = application::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            job_id: Set(job_id),
            cover_note: Set(cover_note),
            status: Set(ApplicationStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_on_duplicate(e, MSG_ALREADY_APPLIED))?;

        Ok(Application::from(model))
    }

    async fn list_for_candidate(&self, user_id: Uuid) -> AppResult<Vec<ApplicationWithJob>> {
        let rows = application::Entity::find()
            .filter(application::Column::UserId.eq(user_id))
            .find_also_related(job::Entity)
            .order_by_desc(application::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(application, job)| {
                Some(ApplicationWithJob {
                    application: Application::from(application),
                    job: Job::from(job?),
                })
            })
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> AppResult<Option<Application>> {
        let Some(model) = application::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: application::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(Application::from(model)))
    }
}
