//! Resource ids taken from the URL path.

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Parse a path id. An id that is not a UUID cannot name any stored
/// record, so it reads as "<entity> not found".
pub fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(entity))
}
