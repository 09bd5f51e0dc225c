//! Domain layer - Core business entities and logic
//!
//! Accounts, job postings and applications, the inputs that create or change
//! them, and the field rules those inputs must satisfy.

pub mod application;
pub mod job;
pub mod password;
pub mod user;
pub mod validation;

pub use application::{
    Application, ApplicationDraft, ApplicationStatus, ApplicationWithJob, MyApplications,
    StatusChange,
};
pub use job::{Job, JobChanges, JobDetail, JobFilter, JobListing, JobPage, JobQuery, JobType, NewJob};
pub use password::Password;
pub use user::{Credentials, NewUser, Poster, Registration, User, UserResponse, UserRole};
pub use validation::FieldIssue;
