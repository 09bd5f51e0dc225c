//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{application_handler, auth_handler, health_handler, job_handler};
use crate::domain::{
    Application, ApplicationDraft, ApplicationStatus, ApplicationWithJob, Credentials, FieldIssue,
    Job, JobChanges, JobDetail, JobListing, JobPage, JobType, MyApplications, NewJob, Poster,
    Registration, StatusChange, UserResponse, UserRole,
};
use crate::errors::ErrorResponse;
use crate::services::AuthResponse;
use crate::types::{MessageResponse, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hiring API",
        version = "0.1.0",
        description = "Job board backend: accounts, job postings and candidate applications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        health_handler::health,
        auth_handler::register,
        auth_handler::login,
        job_handler::list_jobs,
        job_handler::get_job,
        job_handler::create_job,
        job_handler::update_job,
        job_handler::delete_job,
        application_handler::apply,
        application_handler::my_applications,
        application_handler::set_status,
    ),
    components(
        schemas(
            // Accounts
            UserRole,
            UserResponse,
            Registration,
            Credentials,
            AuthResponse,
            // Jobs
            JobType,
            Job,
            Poster,
            JobListing,
            JobDetail,
            JobPage,
            NewJob,
            JobChanges,
            PaginationMeta,
            // Applications
            ApplicationStatus,
            Application,
            ApplicationWithJob,
            ApplicationDraft,
            StatusChange,
            MyApplications,
            // Shared
            MessageResponse,
            ErrorResponse,
            FieldIssue,
            health_handler::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Jobs", description = "Job postings"),
        (name = "Applications", description = "Candidate applications")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/auth/login or /api/auth/register"))
                        .build(),
                ),
            );
        }
    }
}
