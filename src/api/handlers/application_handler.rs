//! Application handlers. Every route requires a token.

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};

use crate::api::extractors::{parse_id, ApiJson};
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{Application, ApplicationDraft, ApplicationWithJob, MyApplications, StatusChange};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::Created;

pub fn application_routes(state: AppState) -> Router<AppState> {
    // The job id of an apply shares the `:id` slot with the application id
    // used by the status route.
    Router::new()
        .route("/my", get(my_applications))
        .route("/:id", post(apply))
        .route("/:id/status", patch(set_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Apply to a job
#[utoipa::path(
    post,
    path = "/api/applications/{jobId}",
    tag = "Applications",
    params(("jobId" = String, Path, description = "Job to apply to")),
    request_body(content = ApplicationDraft, description = "Optional; the body may be empty"),
    responses(
        (status = 201, description = "Application submitted", body = ApplicationWithJob),
        (status = 400, description = "Already applied to this job", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn apply(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(job_id): Path<String>,
    ApiJson(draft): ApiJson<ApplicationDraft>,
) -> AppResult<Created<ApplicationWithJob>> {
    let job_id = parse_id(&job_id, "Job")?;
    let application = state
        .application_service
        .apply(job_id, current_user.id, draft)
        .await?;
    Ok(Created(application))
}

/// List the caller's applications
#[utoipa::path(
    get,
    path = "/api/applications/my",
    tag = "Applications",
    responses(
        (status = 200, description = "Applications, newest first", body = MyApplications),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<MyApplications>> {
    let applications = state
        .application_service
        .list_mine(current_user.id)
        .await?;
    Ok(Json(MyApplications::from(applications)))
}

/// Change an application's status
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    tag = "Applications",
    params(("id" = String, Path, description = "Application ID")),
    request_body = StatusChange,
    responses(
        (status = 200, description = "Updated application", body = Application),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(change): ApiJson<StatusChange>,
) -> AppResult<Json<Application>> {
    let id = parse_id(&id, "Application")?;
    let application = state.application_service.set_status(id, change).await?;
    Ok(Json(application))
}
