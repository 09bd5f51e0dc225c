//! In-memory persistence and router helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use hiring_api::config::Config;
use hiring_api::domain::{
    Application, ApplicationStatus, ApplicationWithJob, Job, JobChanges, JobDetail, JobFilter,
    JobListing, NewJob, NewUser, Poster, User,
};
use hiring_api::errors::{AppError, AppResult};
use hiring_api::infra::{
    ApplicationRepository, InMemoryRateLimiter, JobRepository, UnitOfWork, UserRepository,
};
use hiring_api::{create_router, AppState, Services};

pub const TEST_SECRET: &str = "integration-test-secret-32-chars-min";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

type Shared = Arc<Mutex<Tables>>;

fn lock(tables: &Shared) -> MutexGuard<'_, Tables> {
    tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Unit of Work over plain vectors, enforcing the same unique keys and
/// cascades as the database schema.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Shared,
}

impl MemoryStore {
    pub fn application_count(&self) -> usize {
        lock(&self.tables).applications.len()
    }
}

impl UnitOfWork for MemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(MemoryUsers(self.tables.clone()))
    }

    fn jobs(&self) -> Arc<dyn JobRepository> {
        Arc::new(MemoryJobs(self.tables.clone()))
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        Arc::new(MemoryApplications(self.tables.clone()))
    }
}

struct MemoryUsers(Shared);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(lock(&self.0).users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut tables = lock(&self.0);
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email already registered"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

struct MemoryJobs(Shared);

fn matches_filter(job: &Job, filter: &JobFilter) -> bool {
    let contains = |haystack: &str, needle: &str| haystack.to_lowercase().contains(&needle.to_lowercase());

    filter
        .search
        .as_deref()
        .map_or(true, |s| contains(&job.title, s) || contains(&job.company, s))
        && filter
            .job_type
            .as_deref()
            .map_or(true, |t| job.job_type.as_str() == t)
        && filter
            .location
            .as_deref()
            .map_or(true, |l| contains(&job.location, l))
}

fn poster_of(tables: &Tables, user_id: Uuid) -> Option<Poster> {
    tables
        .users
        .iter()
        .find(|u| u.id == user_id)
        .cloned()
        .map(Poster::from)
}

#[async_trait]
impl JobRepository for MemoryJobs {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>> {
        Ok(lock(&self.0).jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<JobDetail>> {
        let tables = lock(&self.0);
        Ok(tables.jobs.iter().find(|j| j.id == id).and_then(|job| {
            poster_of(&tables, job.user_id).map(|user| JobDetail {
                job: job.clone(),
                user,
            })
        }))
    }

    async fn find_page(&self, filter: JobFilter, offset: u64, limit: u64) -> AppResult<Vec<JobListing>> {
        let tables = lock(&self.0);
        // Newest first: later inserts win ties on the timestamp
        let mut jobs: Vec<&Job> = tables.jobs.iter().rev().filter(|j| matches_filter(j, &filter)).collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(jobs
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .filter_map(|job| {
                let user = poster_of(&tables, job.user_id)?;
                let application_count = tables
                    .applications
                    .iter()
                    .filter(|a| a.job_id == job.id)
                    .count() as u64;
                Some(JobListing {
                    job: job.clone(),
                    user,
                    application_count,
                })
            })
            .collect())
    }

    async fn count(&self, filter: JobFilter) -> AppResult<u64> {
        Ok(lock(&self.0)
            .jobs
            .iter()
            .filter(|j| matches_filter(j, &filter))
            .count() as u64)
    }

    async fn create(&self, user_id: Uuid, job: NewJob) -> AppResult<Job> {
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type.parse().unwrap_or_default(),
            salary: job.salary,
            description: job.description,
            user_id,
            created_at: now,
            updated_at: now,
        };
        lock(&self.0).jobs.push(job.clone());
        Ok(job)
    }

    async fn update(&self, id: Uuid, changes: JobChanges) -> AppResult<Job> {
        let mut tables = lock(&self.0);
        let job = tables
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| AppError::not_found("Job"))?;

        if let Some(title) = changes.title {
            job.title = title;
        }
        if let Some(company) = changes.company {
            job.company = company;
        }
        if let Some(location) = changes.location {
            job.location = location;
        }
        if let Some(job_type) = changes.job_type {
            job.job_type = job_type.parse().unwrap_or_default();
        }
        if let Some(salary) = changes.salary {
            job.salary = Some(salary);
        }
        if let Some(description) = changes.description {
            job.description = description;
        }
        job.updated_at = Utc::now();

        Ok(job.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = lock(&self.0);
        let before = tables.jobs.len();
        tables.jobs.retain(|j| j.id != id);
        if tables.jobs.len() == before {
            return Err(AppError::not_found("Job"));
        }
        tables.applications.retain(|a| a.job_id != id);
        Ok(())
    }
}

struct MemoryApplications(Shared);

#[async_trait]
impl ApplicationRepository for MemoryApplications {
    async fn find_by_candidate_and_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<Option<Application>> {
        Ok(lock(&self.0)
            .applications
            .iter()
            .find(|a| a.user_id == user_id && a.job_id == job_id)
            .cloned())
    }

    async fn create(&self, user_id: Uuid, job_id: Uuid, cover_note: Option<String>) -> AppResult<Application> {
        let mut tables = lock(&self.0);
        if tables
            .applications
            .iter()
            .any(|a| a.user_id == user_id && a.job_id == job_id)
        {
            return Err(AppError::conflict("Already applied to this job"));
        }

        let now = Utc::now();
        let application = Application {
            id: Uuid::new_v4(),
            user_id,
            job_id,
            cover_note,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.applications.push(application.clone());
        Ok(application)
    }

    async fn list_for_candidate(&self, user_id: Uuid) -> AppResult<Vec<ApplicationWithJob>> {
        let tables = lock(&self.0);
        let mut mine: Vec<&Application> = tables
            .applications
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(mine
            .into_iter()
            .filter_map(|application| {
                let job = tables.jobs.iter().find(|j| j.id == application.job_id)?;
                Some(ApplicationWithJob {
                    application: application.clone(),
                    job: job.clone(),
                })
            })
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> AppResult<Option<Application>> {
        let mut tables = lock(&self.0);
        Ok(tables.applications.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.updated_at = Utc::now();
            a.clone()
        }))
    }
}

pub fn test_config() -> Config {
    Config::with_secret(TEST_SECRET).expect("test secret is long enough")
}

/// Router over a fresh in-memory store
pub fn test_app() -> (Router, MemoryStore) {
    app_with(MemoryStore::default(), test_config())
}

pub fn app_with<U: UnitOfWork + Clone + 'static>(store: U, config: Config) -> (Router, U) {
    let services = Services::from_unit_of_work(Arc::new(store.clone()), config.clone());
    let state = AppState::new(&services, Arc::new(InMemoryRateLimiter::new()), config);
    (create_router(state), store)
}

/// Send a request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("valid request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Register an account and return `(token, user id)`.
pub async fn register(app: &Router, name: &str, email: &str, role: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": "s3cret-pass",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    (
        body["token"].as_str().expect("token").to_string(),
        body["user"]["id"].as_str().expect("id").to_string(),
    )
}

/// Post a job as `token` and return its id.
pub async fn post_job(app: &Router, token: &str, title: &str, company: &str, location: &str, job_type: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/jobs",
        Some(token),
        Some(serde_json::json!({
            "title": title,
            "company": company,
            "location": location,
            "type": job_type,
            "salary": "90k",
            "description": "Build and run the platform end to end.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "post job failed: {body}");

    body["id"].as_str().expect("job id").to_string()
}
