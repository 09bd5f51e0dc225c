//! Job posting entity, its inputs and read views.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::user::Poster;
use super::validation::validate_job_type;
use crate::types::{PaginationMeta, PaginationParams};

/// Employment type of a posting. Serialized with the exact labels clients send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Remote,
}

impl JobType {
    pub const VALUES: [&'static str; 4] = ["Full-time", "Part-time", "Contract", "Remote"];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
        }
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full-time" => Ok(JobType::FullTime),
            "Part-time" => Ok(JobType::PartTime),
            "Contract" => Ok(JobType::Contract),
            "Remote" => Ok(JobType::Remote),
            other => Err(format!("unknown job type '{}'", other)),
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job posting
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    #[schema(example = "Backend Engineer")]
    pub title: String,
    #[schema(example = "Acme")]
    pub company: String,
    #[schema(example = "Berlin")]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[schema(example = "€70k - €90k")]
    pub salary: Option<String>,
    pub description: String,
    /// Owner (the account that posted the job)
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Job as shown in the public listing
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub user: Poster,
    pub application_count: u64,
}

/// Single job with its poster
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub user: Poster,
}

/// One page of the job listing
#[derive(Debug, Serialize, ToSchema)]
pub struct JobPage {
    pub jobs: Vec<JobListing>,
    pub pagination: PaginationMeta,
}

/// Job creation input
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct NewJob {
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    #[schema(example = "Backend Engineer")]
    pub title: String,
    #[validate(length(min = 2, message = "Company must be at least 2 characters"))]
    #[schema(example = "Acme")]
    pub company: String,
    #[validate(length(min = 2, message = "Location must be at least 2 characters"))]
    #[schema(example = "Berlin")]
    pub location: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_job_type"))]
    #[schema(example = "Full-time")]
    pub job_type: String,
    pub salary: Option<String>,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    #[schema(example = "Build and run our hiring platform.")]
    pub description: String,
}

/// Partial job update; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct JobChanges {
    #[validate(length(min = 2, message = "Title must be at least 2 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 2, message = "Company must be at least 2 characters"))]
    pub company: Option<String>,
    #[validate(length(min = 2, message = "Location must be at least 2 characters"))]
    pub location: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_job_type"))]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,
}

/// Listing filters. Empty strings never reach here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of title or company
    pub search: Option<String>,
    /// Exact job type label
    pub job_type: Option<String>,
    /// Case-insensitive substring of location
    pub location: Option<String>,
}

/// Raw listing query string. Numbers are parsed leniently.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobQuery {
    /// Matches title or company, case-insensitive
    pub search: Option<String>,
    /// Exact job type
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    /// Matches location, case-insensitive
    pub location: Option<String>,
    /// 1-based page, defaults to 1
    pub page: Option<String>,
    /// Page size, defaults to 10
    pub limit: Option<String>,
}

impl JobQuery {
    pub fn filter(&self) -> JobFilter {
        fn non_empty(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }

        JobFilter {
            search: non_empty(&self.search),
            job_type: non_empty(&self.job_type),
            location: non_empty(&self.location),
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}
