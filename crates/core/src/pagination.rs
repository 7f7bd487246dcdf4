//! Page requests and page envelopes for the pending review queue.
//!
//! Pages are zero-indexed. A request is validated once, at the boundary,
//! and from then on carries an offset/limit pair the stores can use as-is.

use serde::Serialize;

use crate::error::CoreError;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Sizes above this are clamped down rather than rejected.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Validate a page request.
    ///
    /// - Missing values fall back to page `0` and [`DEFAULT_PAGE_SIZE`].
    /// - Negative page or size, and a size of `0`, are validation errors.
    /// - Sizes above [`MAX_PAGE_SIZE`] are clamped to it.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(0);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 0 {
            return Err(CoreError::Validation(format!(
                "page must be zero or greater, got {page}"
            )));
        }
        if size <= 0 {
            return Err(CoreError::Validation(format!(
                "size must be at least 1, got {size}"
            )));
        }

        Ok(Self {
            page,
            size: size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_pages(total_elements, request.size()),
            current_page: request.page(),
            page_size: request.size(),
        }
    }
}

/// Number of pages needed for `total` items at `size` per page.
pub fn total_pages(total: i64, size: i64) -> i64 {
    if total <= 0 || size <= 0 {
        return 0;
    }
    (total + size - 1) / size
}
