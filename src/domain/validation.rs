//! Structured validation issues and the custom field checks shared by the
//! request types.

use std::borrow::Cow;

use serde::Serialize;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

use super::{JobType, UserRole};

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldIssue {
    /// Offending field
    #[schema(example = "title")]
    pub field: String,
    /// Machine-readable constraint code
    #[schema(example = "length")]
    pub code: String,
    /// Human-readable message
    #[schema(example = "Title must be at least 2 characters")]
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Flatten `validator` output into a list ordered by field name.
    /// Fields are reported under their JSON key.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Vec<Self> {
        let mut issues: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = wire_name(field);
                errs.iter().map(move |e| Self {
                    field: field.to_string(),
                    code: e.code.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();

        issues.sort_by(|a, b| a.field.cmp(&b.field));
        issues
    }
}

/// JSON key of a struct field whose Rust name differs from it.
fn wire_name(field: &str) -> &str {
    match field {
        "job_type" => "type",
        other => other,
    }
}

fn enum_error(message: String) -> ValidationError {
    let mut error = ValidationError::new("invalid_enum_value");
    error.message = Some(Cow::from(message));
    error
}

fn one_of(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn validate_job_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<JobType>()
        .map(|_| ())
        .map_err(|_| enum_error(format!("Expected {}", one_of(&JobType::VALUES))))
}

pub fn validate_role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<UserRole>()
        .map(|_| ())
        .map_err(|_| enum_error(format!("Expected {}", one_of(&UserRole::VALUES))))
}
