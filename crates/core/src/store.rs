//! Persistence seams for content items and votes.
//!
//! The services in this crate are generic over these traits. `slangdex-db`
//! implements them on PostgreSQL; [`crate::memory::InMemoryStore`]
//! implements them in process.
//!
//! Every mutating method must be atomic on its own: implementations apply
//! each one as a single conditional statement (or inside one transaction),
//! so concurrent callers never observe or produce a half-applied change.

use std::collections::HashMap;
use std::future::Future;

use crate::content::{ContentItem, ContentStatus, NewContent, ReviewRequest};
use crate::error::CoreError;
use crate::pagination::PageRequest;
use crate::types::DbId;
use crate::vote::{VoteTally, VoteType};

/// Result of an atomic review attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    /// The item was `PENDING` and now carries the decision.
    Applied(ContentItem),
    /// The item exists but had already left `PENDING`.
    AlreadyReviewed(ContentStatus),
    /// No item with that id exists.
    Missing,
}

/// Storage for content items.
pub trait ContentStore: Send + Sync {
    /// Insert a new item in `PENDING` status.
    fn insert(
        &self,
        content: &NewContent,
    ) -> impl Future<Output = Result<ContentItem, CoreError>> + Send;

    fn find_by_id(
        &self,
        id: DbId,
    ) -> impl Future<Output = Result<Option<ContentItem>, CoreError>> + Send;

    /// All items in `status`, oldest first (`created_at`, then `id`).
    fn list_by_status(
        &self,
        status: ContentStatus,
    ) -> impl Future<Output = Result<Vec<ContentItem>, CoreError>> + Send;

    /// One page of items in `status`, oldest first, together with the total
    /// number of items in that status, both taken from the same snapshot.
    fn page_by_status(
        &self,
        status: ContentStatus,
        request: PageRequest,
    ) -> impl Future<Output = Result<(Vec<ContentItem>, i64), CoreError>> + Send;

    /// Approved items whose trimmed, lower-cased term equals `normalized_term`.
    fn find_approved_by_term(
        &self,
        normalized_term: &str,
    ) -> impl Future<Output = Result<Vec<ContentItem>, CoreError>> + Send;

    /// Approved items whose term contains `query`, ignoring case.
    fn search_approved(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ContentItem>, CoreError>> + Send;

    /// Apply a review decision if, and only if, the item is still `PENDING`.
    ///
    /// The status check and the write must be one atomic step.
    fn apply_review(
        &self,
        id: DbId,
        review: &ReviewRequest,
    ) -> impl Future<Output = Result<ReviewOutcome, CoreError>> + Send;
}

/// Storage for per-voter votes.
pub trait VoteStore: Send + Sync {
    /// The voter's current vote on an item, if any.
    fn find_vote(
        &self,
        content_id: DbId,
        voter: &str,
    ) -> impl Future<Output = Result<Option<VoteType>, CoreError>> + Send;

    /// Create or replace the voter's vote. Re-casting the same type leaves
    /// the stored row untouched.
    fn upsert_vote(
        &self,
        content_id: DbId,
        voter: &str,
        vote_type: VoteType,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Remove the voter's vote. Returns whether a vote existed.
    fn delete_vote(
        &self,
        content_id: DbId,
        voter: &str,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    /// Tallies for every id in `content_ids`, computed with a fixed number of
    /// queries independent of the set size. Ids without votes map to zero.
    fn tally_for_set(
        &self,
        content_ids: &[DbId],
        viewer: Option<&str>,
    ) -> impl Future<Output = Result<HashMap<DbId, VoteTally>, CoreError>> + Send;
}
