//! Job posting persistence, including the filtered listing query.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::{application, job, user};
use crate::domain::{Job, JobChanges, JobDetail, JobFilter, JobListing, NewJob, Poster};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Job repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>>;

    /// Job together with its poster
    async fn find_detail(&self, id: Uuid) -> AppResult<Option<JobDetail>>;

    /// One page of matching jobs, newest first, each with poster and
    /// application count
    async fn find_page(&self, filter: JobFilter, offset: u64, limit: u64) -> AppResult<Vec<JobListing>>;

    /// Number of jobs matching `filter`
    async fn count(&self, filter: JobFilter) -> AppResult<u64>;

    async fn create(&self, user_id: Uuid, job: NewJob) -> AppResult<Job>;

    /// Apply the supplied fields; absent fields are left untouched.
    async fn update(&self, id: Uuid, changes: JobChanges) -> AppResult<Job>;

    /// Delete a job and, through the foreign key, its applications.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed [`JobRepository`]
pub struct JobStore {
    db: DatabaseConnection,
}

impl JobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Application counts keyed by job id
    async fn application_counts(&self, job_ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, u64>> {
        if job_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = application::Entity::find()
            .select_only()
            .column(application::Column::JobId)
            .column_as(application::Column::Id.count(), "count")
            .filter(application::Column::JobId.is_in(job_ids))
            .group_by(application::Column::JobId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(job_id, count)| (job_id, count.max(0) as u64))
            .collect())
    }
}

/// Escape LIKE metacharacters and wrap for a lowercase substring match.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn lower_contains(column: job::Column, term: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col((job::Entity, column))))
        .like(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

fn apply_filter(query: Select<job::Entity>, filter: &JobFilter) -> Select<job::Entity> {
    let mut condition = Condition::all();

    if let Some(search) = &filter.search {
        condition = condition.add(
            Condition::any()
                .add(lower_contains(job::Column::Title, search))
                .add(lower_contains(job::Column::Company, search)),
        );
    }
    if let Some(job_type) = &filter.job_type {
        condition = condition.add(job::Column::JobType.eq(job_type.as_str()));
    }
    if let Some(location) = &filter.location {
        condition = condition.add(lower_contains(job::Column::Location, location));
    }

    query.filter(condition)
}

#[async_trait]
impl JobRepository for JobStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>> {
        let result = job::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Job::from))
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<JobDetail>> {
        let result = job::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(result.and_then(|(job, poster)| {
            poster.map(|poster| JobDetail {
                job: Job::from(job),
                user: Poster::from(poster),
            })
        }))
    }

    async fn find_page(&self, filter: JobFilter, offset: u64, limit: u64) -> AppResult<Vec<JobListing>> {
        let rows = apply_filter(job::Entity::find(), &filter)
            .find_also_related(user::Entity)
            .order_by_desc(job::Column::CreatedAt)
            .order_by_desc(job::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        let counts = self
            .application_counts(rows.iter().map(|(job, _)| job.id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(job, poster)| {
                let poster = poster?;
                let application_count = counts.get(&job.id).copied().unwrap_or(0);
                Some(JobListing {
                    job: Job::from(job),
                    user: Poster::from(poster),
                    application_count,
                })
            })
            .collect())
    }

    async fn count(&self, filter: JobFilter) -> AppResult<u64> {
        let total = apply_filter(job::Entity::find(), &filter)
            .count(&self.db)
            .await?;
        Ok(total)
    }

    async fn create(&self, user_id: Uuid, job: NewJob) -> AppResult<Job> {
        let now = chrono::Utc::now();
        let active_model = job::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(job.title),
            company: Set(job.company),
            location: Set(job.location),
            job_type: Set(job.job_type),
            salary: Set(job.salary),
            description: Set(job.description),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Job::from(model))
    }

    async fn update(&self, id: Uuid, changes: JobChanges) -> AppResult<Job> {
        let model = job::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;

        let mut active: job::ActiveModel = model.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(company) = changes.company {
            active.company = Set(company);
        }
        if let Some(location) = changes.location {
            active.location = Set(location);
        }
        if let Some(job_type) = changes.job_type {
            active.job_type = Set(job_type);
        }
        if let Some(salary) = changes.salary {
            active.salary = Set(Some(salary));
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Job::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = job::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Job"));
        }

        Ok(())
    }
}
