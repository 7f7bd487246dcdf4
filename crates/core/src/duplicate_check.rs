//! Advisory lookup of approved items with the same term as a submission.
//!
//! Matching is exact on the trimmed, lower-cased term. It never blocks a
//! submission; the caller shows the matches and lets the contributor
//! decide whether to submit anyway.

use crate::content::{normalize_term, ContentItem};
use crate::error::CoreError;
use crate::retry::{retry_read, RetryPolicy};
use crate::store::ContentStore;

#[derive(Debug, Clone)]
pub struct DuplicateCheck<S> {
    store: S,
    retry: RetryPolicy,
}

impl<S: ContentStore> DuplicateCheck<S> {
    pub fn new(store: S, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Approved items whose term matches `term` ignoring case and padding.
    pub async fn find_existing_approved(&self, term: &str) -> Result<Vec<ContentItem>, CoreError> {
        let normalized = normalize_term(term);
        if normalized.is_empty() {
            return Err(CoreError::Validation("term: must not be blank".into()));
        }

        let matches = retry_read(&self.retry, "find_approved_by_term", || {
            self.store.find_approved_by_term(&normalized)
        })
        .await?;

        if !matches.is_empty() {
            tracing::debug!(term = %normalized, count = matches.len(), "Duplicate term found");
        }

        Ok(matches)
    }
}
