//! Page/limit pagination for list endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const MAX_ROW_OFFSET: u64 = i64::MAX as u64;

/// Resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
}

impl PaginationParams {
    /// Resolve raw query values. Missing, non-numeric or zero values fall back
    /// to the defaults; a leading integer is accepted ("3abc" is page 3).
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.and_then(leading_int).unwrap_or(DEFAULT_PAGE_NUMBER);
        let limit = limit
            .and_then(leading_int)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Rows to skip: `(page - 1) * limit`, capped at the largest offset the
    /// database binds as a signed 64-bit integer.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(MAX_ROW_OFFSET)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Positive integer prefix of `raw`, if any.
fn leading_int(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok().filter(|n| *n > 0)
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(params: PaginationParams, total: u64) -> Self {
        let total_pages = if params.limit > 0 {
            total.div_ceil(params.limit)
        } else {
            0
        };

        Self {
            page: params.page,
            limit: params.limit,
            total,
            total_pages,
        }
    }
}
