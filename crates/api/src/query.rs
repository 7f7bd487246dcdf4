//! Query parameter types for API handlers.

use serde::Deserialize;

/// Pending-queue pagination (`?page=&size=`).
///
/// Both default when absent; range checks and clamping happen in
/// `PageRequest::new`.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Dictionary search (`?q=`). A missing or blank query lists everything.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Duplicate-term lookup (`?term=`).
#[derive(Debug, Deserialize)]
pub struct DuplicateParams {
    #[serde(default)]
    pub term: String,
}
