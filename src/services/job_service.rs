//! Job catalog - postings, their owners and the public listing.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::container::parallel;
use crate::config::MSG_JOB_DELETED;
use crate::domain::{Job, JobChanges, JobDetail, JobFilter, JobPage, NewJob};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{MessageResponse, PaginationMeta, PaginationParams};

/// Job service trait for dependency injection.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Filtered page of postings, newest first
    async fn list(&self, filter: JobFilter, pagination: PaginationParams) -> AppResult<JobPage>;

    async fn get(&self, id: Uuid) -> AppResult<JobDetail>;

    /// Post a job owned by `user_id`
    async fn create(&self, user_id: Uuid, input: NewJob) -> AppResult<Job>;

    /// Owner-only partial update
    async fn update(&self, id: Uuid, user_id: Uuid, changes: JobChanges) -> AppResult<Job>;

    /// Owner-only delete
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<MessageResponse>;
}

/// Concrete implementation of JobService using Unit of Work.
pub struct JobCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> JobCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Existence first, then ownership: a missing job is never a 403.
    async fn owned_job(&self, id: Uuid, user_id: Uuid) -> AppResult<Job> {
        let job = self.uow.jobs().find_by_id(id).await?.ok_or_not_found("Job")?;

        if !job.is_owned_by(user_id) {
            tracing::warn!(job_id = %id, user_id = %user_id, "Rejected change by non-owner");
            return Err(AppError::Forbidden);
        }

        Ok(job)
    }
}

#[async_trait]
impl<U: UnitOfWork> JobService for JobCatalog<U> {
    async fn list(&self, filter: JobFilter, pagination: PaginationParams) -> AppResult<JobPage> {
        let jobs = self.uow.jobs();

        let (page, total) = parallel::join2(
            jobs.find_page(filter.clone(), pagination.offset(), pagination.limit),
            jobs.count(filter),
        )
        .await?;

        Ok(JobPage {
            jobs: page,
            pagination: PaginationMeta::new(pagination, total),
        })
    }

    async fn get(&self, id: Uuid) -> AppResult<JobDetail> {
        self.uow.jobs().find_detail(id).await?.ok_or_not_found("Job")
    }

    async fn create(&self, user_id: Uuid, input: NewJob) -> AppResult<Job> {
        input.validate()?;

        let job = self.uow.jobs().create(user_id, input).await?;
        tracing::info!(job_id = %job.id, user_id = %user_id, "Job posted");

        Ok(job)
    }

    async fn update(&self, id: Uuid, user_id: Uuid, changes: JobChanges) -> AppResult<Job> {
        self.owned_job(id, user_id).await?;
        changes.validate()?;

        self.uow.jobs().update(id, changes).await
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<MessageResponse> {
        self.owned_job(id, user_id).await?;
        self.uow.jobs().delete(id).await?;

        tracing::info!(job_id = %id, "Job deleted");

        Ok(MessageResponse::new(MSG_JOB_DELETED))
    }
}
