//! Job posting handlers. Reads are public, writes need a token and only
//! the poster may change or remove a job.

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};

use crate::api::extractors::{parse_id, ApiJson};
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{Job, JobChanges, JobDetail, JobPage, JobQuery, NewJob};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{Created, MessageResponse};

pub fn job_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_job))
        .route("/:id", patch(update_job).delete(delete_job))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(list_jobs))
        .route("/:id", get(get_job))
        .merge(protected)
}

/// List jobs
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Jobs",
    params(JobQuery),
    responses(
        (status = 200, description = "Filtered page of jobs, newest first", body = JobPage)
    )
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> AppResult<Json<JobPage>> {
    let page = state
        .job_service
        .list(query.filter(), query.pagination())
        .await?;
    Ok(Json(page))
}

/// Get a job
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job with its poster", body = JobDetail),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobDetail>> {
    let id = parse_id(&id, "Job")?;
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}

/// Post a job
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Jobs",
    request_body = NewJob,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<NewJob>,
) -> AppResult<Created<Job>> {
    let job = state.job_service.create(current_user.id, payload).await?;
    Ok(Created(job))
}

/// Update a job
#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job ID")),
    request_body = JobChanges,
    responses(
        (status = 200, description = "Updated job", body = Job),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the job", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<JobChanges>,
) -> AppResult<Json<Job>> {
    let id = parse_id(&id, "Job")?;
    let job = state
        .job_service
        .update(id, current_user.id, payload)
        .await?;
    Ok(Json(job))
}

/// Delete a job
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the job", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id, "Job")?;
    let response = state.job_service.delete(id, current_user.id).await?;
    Ok(Json(response))
}
