//! Candidate applications to job postings.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::job::Job;

/// Review status of an application. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Interview,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub const VALUES: [&'static str; 5] = ["Pending", "Reviewed", "Interview", "Rejected", "Accepted"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Accepted => "Accepted",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    /// Case-sensitive: "pending" is not a status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ApplicationStatus::Pending),
            "Reviewed" => Ok(ApplicationStatus::Reviewed),
            "Interview" => Ok(ApplicationStatus::Interview),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            "Accepted" => Ok(ApplicationStatus::Accepted),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate's application
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    /// Candidate who applied
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub cover_note: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application joined with the job it targets
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub job: Job,
}

/// Submission input
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[schema(example = "I have shipped three hiring platforms.")]
    pub cover_note: Option<String>,
}

/// Status change input. The value is matched case-sensitively against
/// [`ApplicationStatus::VALUES`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct StatusChange {
    #[schema(example = "Interview")]
    pub status: String,
}

/// Response for the candidate's own applications
#[derive(Debug, Serialize, ToSchema)]
pub struct MyApplications {
    pub count: usize,
    pub applications: Vec<ApplicationWithJob>,
}

impl From<Vec<ApplicationWithJob>> for MyApplications {
    fn from(applications: Vec<ApplicationWithJob>) -> Self {
        Self {
            count: applications.len(),
            applications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_exactly_five_values() {
        for value in ApplicationStatus::VALUES {
            assert_eq!(value.parse::<ApplicationStatus>().unwrap().as_str(), value);
        }
        for value in ["pending", "PENDING", "Hired", "", " Pending"] {
            assert!(value.parse::<ApplicationStatus>().is_err(), "{value} accepted");
        }
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }

    #[test]
    fn test_status_change_missing_field_is_empty() {
        let change: StatusChange = serde_json::from_str("{}").unwrap();
        assert!(change.status.parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_draft_reads_camel_case() {
        let draft: ApplicationDraft = serde_json::from_str(r#"{"coverNote":"hello"}"#).unwrap();
        assert_eq!(draft.cover_note.as_deref(), Some("hello"));
    }
}
