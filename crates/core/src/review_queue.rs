//! Moderator-facing review queue.
//!
//! The queue is the set of `PENDING` items ordered by `created_at` then
//! `id`, both ascending. Both keys are fixed at insertion, so moderators
//! paging concurrently see the same order, and newly submitted items only
//! ever land at the end of the queue.

use crate::catalog::Catalog;
use crate::content::{require_rejection_comment, ContentItem, Decision, ReviewRequest};
use crate::error::CoreError;
use crate::pagination::{Page, PageRequest};
use crate::store::ContentStore;
use crate::types::DbId;

#[derive(Debug, Clone)]
pub struct ReviewQueue<S> {
    catalog: Catalog<S>,
}

impl<S: ContentStore> ReviewQueue<S> {
    pub fn new(catalog: Catalog<S>) -> Self {
        Self { catalog }
    }

    pub async fn get_pending_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<ContentItem>, CoreError> {
        self.catalog.list_pending_page(request).await
    }

    pub async fn list_pending(&self) -> Result<Vec<ContentItem>, CoreError> {
        self.catalog.list_pending().await
    }

    /// Approve a pending item. A second approval fails with `InvalidState`.
    pub async fn approve(
        &self,
        id: DbId,
        reviewer: &str,
        comment: Option<&str>,
    ) -> Result<ContentItem, CoreError> {
        self.review(id, reviewer, Decision::Approve, comment).await
    }

    /// Reject a pending item. The comment is mandatory.
    pub async fn reject(
        &self,
        id: DbId,
        reviewer: &str,
        comment: &str,
    ) -> Result<ContentItem, CoreError> {
        self.review(id, reviewer, Decision::Reject, Some(comment)).await
    }

    /// Apply `decision`, enforcing that rejections carry a comment.
    pub async fn review(
        &self,
        id: DbId,
        reviewer: &str,
        decision: Decision,
        comment: Option<&str>,
    ) -> Result<ContentItem, CoreError> {
        require_rejection_comment(decision, comment)?;
        let request = ReviewRequest::new(reviewer, decision, comment)?;
        self.catalog.review(id, &request).await
    }
}
