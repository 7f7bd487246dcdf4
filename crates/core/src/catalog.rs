//! Content store operations: submission, lookup, listing and the single
//! review transition.

use crate::content::{ContentItem, ContentStatus, NewContent, ReviewRequest};
use crate::error::CoreError;
use crate::pagination::{Page, PageRequest};
use crate::retry::{retry_read, RetryPolicy};
use crate::store::{ContentStore, ReviewOutcome};
use crate::types::DbId;

/// Entity name used in not-found errors for content items.
pub const CONTENT_ENTITY: &str = "Content";

/// Content lifecycle operations over a [`ContentStore`].
///
/// Reads are retried according to the configured [`RetryPolicy`]; the two
/// writes ([`Catalog::submit`] and [`Catalog::review`]) are attempted once.
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    store: S,
    retry: RetryPolicy,
}

impl<S: ContentStore> Catalog<S> {
    pub fn new(store: S, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Validate and persist a new submission in `PENDING` status.
    pub async fn submit(
        &self,
        term: &str,
        definition: &str,
        example: Option<&str>,
        submitted_by: &str,
    ) -> Result<ContentItem, CoreError> {
        let submission = NewContent::new(term, definition, example, submitted_by)?;
        let item = self.store.insert(&submission).await?;

        tracing::info!(
            content_id = item.id,
            submitted_by = %item.submitted_by,
            term = %item.term,
            "Content submitted"
        );

        Ok(item)
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<ContentItem, CoreError> {
        retry_read(&self.retry, "find_content", || self.store.find_by_id(id))
            .await?
            .ok_or(CoreError::NotFound {
                entity: CONTENT_ENTITY,
                id,
            })
    }

    /// All approved items, oldest first.
    pub async fn list_approved(&self) -> Result<Vec<ContentItem>, CoreError> {
        retry_read(&self.retry, "list_approved", || {
            self.store.list_by_status(ContentStatus::Approved)
        })
        .await
    }

    /// Dictionary search: approved items whose term contains `query`.
    ///
    /// A blank query lists every approved item.
    pub async fn search_approved(&self, query: &str) -> Result<Vec<ContentItem>, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_approved().await;
        }
        retry_read(&self.retry, "search_approved", || {
            self.store.search_approved(query)
        })
        .await
    }

    /// All pending items, oldest first.
    pub async fn list_pending(&self) -> Result<Vec<ContentItem>, CoreError> {
        retry_read(&self.retry, "list_pending", || {
            self.store.list_by_status(ContentStatus::Pending)
        })
        .await
    }

    /// One page of pending items, oldest first.
    pub async fn list_pending_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<ContentItem>, CoreError> {
        let (items, total) = retry_read(&self.retry, "page_pending", || {
            self.store.page_by_status(ContentStatus::Pending, request)
        })
        .await?;
        Ok(Page::new(items, total, request))
    }

    /// Apply a review decision to a pending item.
    ///
    /// Fails with `NotFound` for an unknown id and `InvalidState` when the
    /// item was already reviewed, including when another reviewer won a
    /// concurrent race for it.
    pub async fn review(&self, id: DbId, review: &ReviewRequest) -> Result<ContentItem, CoreError> {
        match self.store.apply_review(id, review).await? {
            ReviewOutcome::Applied(item) => {
                tracing::info!(
                    content_id = id,
                    reviewer = %review.reviewer,
                    decision = review.decision.as_str(),
                    status = %item.status,
                    "Content reviewed"
                );
                Ok(item)
            }
            ReviewOutcome::AlreadyReviewed(status) => {
                tracing::warn!(
                    content_id = id,
                    reviewer = %review.reviewer,
                    current_status = %status,
                    "Review rejected: content already reviewed"
                );
                Err(CoreError::InvalidState(format!(
                    "Content {id} already reviewed (status {status})"
                )))
            }
            ReviewOutcome::Missing => Err(CoreError::NotFound {
                entity: CONTENT_ENTITY,
                id,
            }),
        }
    }
}
