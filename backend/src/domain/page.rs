//! Offset pagination window shared by feed and recency queries.

use serde::Deserialize;
use utoipa::IntoParams;

/// Default number of records per page.
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound on caller-supplied limits.
pub const MAX_LIMIT: usize = 100;

/// Validated `[skip, skip + limit)` window over a descending ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: usize,
    limit: usize,
}

impl Page {
    /// Build a window, clamping the limit to [`MAX_LIMIT`].
    pub fn new(skip: usize, limit: usize) -> Self {
        Self {
            skip,
            limit: limit.min(MAX_LIMIT),
        }
    }

    /// Number of leading records to drop.
    pub fn skip(self) -> usize {
        self.skip
    }

    /// Maximum number of records to return.
    pub fn limit(self) -> usize {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

/// Query-string form of a page request.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Records to skip from the head of the ordering.
    pub skip: Option<usize>,
    /// Page size; defaults to 10, capped at 100.
    pub limit: Option<usize>,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Self::new(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
