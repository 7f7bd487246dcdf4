//! Per-voter thumbs-up/down votes on approved content and their tallies.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::CONTENT_ENTITY;
use crate::content::{ContentItem, ContentStatus};
use crate::error::CoreError;
use crate::retry::{retry_read, RetryPolicy};
use crate::store::{ContentStore, VoteStore};
use crate::types::DbId;
use crate::vote::{CastOutcome, VoteSummary, VoteTally, VoteType};

/// An approved item together with its tally, as rendered in the dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentWithVotes {
    pub content: ContentItem,
    pub thumbs_up: i64,
    pub thumbs_down: i64,
    pub user_vote: Option<VoteType>,
}

#[derive(Debug, Clone)]
pub struct VoteLedger<S> {
    store: S,
    retry: RetryPolicy,
}

impl<S: ContentStore + VoteStore> VoteLedger<S> {
    pub fn new(store: S, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Record `voter`'s vote on an approved item and return the new tally.
    ///
    /// Casting the same type twice is a no-op; casting the other type
    /// replaces the previous vote.
    pub async fn cast(
        &self,
        content_id: DbId,
        voter: &str,
        vote_type: VoteType,
    ) -> Result<VoteSummary, CoreError> {
        let content = self
            .store
            .find_by_id(content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: CONTENT_ENTITY,
                id: content_id,
            })?;
        if content.status != ContentStatus::Approved {
            return Err(CoreError::InvalidState(format!(
                "Only approved content can be voted on (content {content_id} is {})",
                content.status
            )));
        }

        let previous = self.store.find_vote(content_id, voter).await?;
        let outcome = CastOutcome::of(previous, vote_type);
        if outcome != CastOutcome::Unchanged {
            self.store.upsert_vote(content_id, voter, vote_type).await?;
        }

        tracing::info!(
            content_id,
            voter,
            vote_type = vote_type.as_str(),
            outcome = ?outcome,
            "Vote cast"
        );

        let tally = self.single_tally(content_id, Some(voter)).await?;
        Ok(VoteSummary::new(content_id, tally))
    }

    /// Remove `voter`'s vote. Clearing a vote that does not exist is a no-op.
    pub async fn clear(&self, content_id: DbId, voter: &str) -> Result<VoteSummary, CoreError> {
        self.ensure_content_exists(content_id).await?;

        let removed = self.store.delete_vote(content_id, voter).await?;
        tracing::info!(content_id, voter, removed, "Vote cleared");

        let tally = self.single_tally(content_id, Some(voter)).await?;
        Ok(VoteSummary::new(content_id, tally))
    }

    /// Current tally of an existing item, with `viewer`'s own vote if given.
    pub async fn summary(
        &self,
        content_id: DbId,
        viewer: Option<&str>,
    ) -> Result<VoteSummary, CoreError> {
        self.ensure_content_exists(content_id).await?;
        let tally = self.tally(content_id, viewer).await?;
        Ok(VoteSummary::new(content_id, tally))
    }

    pub async fn tally(&self, content_id: DbId, viewer: Option<&str>) -> Result<VoteTally, CoreError> {
        let mut tallies = self.tally_for_set(&[content_id], viewer).await?;
        Ok(tallies.remove(&content_id).unwrap_or_default())
    }

    /// Tallies for a whole set of items with a bounded number of store calls.
    pub async fn tally_for_set(
        &self,
        content_ids: &[DbId],
        viewer: Option<&str>,
    ) -> Result<HashMap<DbId, VoteTally>, CoreError> {
        if content_ids.is_empty() {
            return Ok(HashMap::new());
        }
        retry_read(&self.retry, "tally_for_set", || {
            self.store.tally_for_set(content_ids, viewer)
        })
        .await
    }

    /// Every approved item with its tally and `viewer`'s vote.
    pub async fn approved_with_votes(
        &self,
        viewer: Option<&str>,
    ) -> Result<Vec<ContentWithVotes>, CoreError> {
        let approved = retry_read(&self.retry, "list_approved", || {
            self.store.list_by_status(ContentStatus::Approved)
        })
        .await?;

        let ids: Vec<DbId> = approved.iter().map(|item| item.id).collect();
        let mut tallies = self.tally_for_set(&ids, viewer).await?;

        Ok(approved
            .into_iter()
            .map(|content| {
                let tally = tallies.remove(&content.id).unwrap_or_default();
                ContentWithVotes {
                    content,
                    thumbs_up: tally.thumbs_up,
                    thumbs_down: tally.thumbs_down,
                    user_vote: tally.user_vote,
                }
            })
            .collect())
    }

    /// Tally read right after a write: attempted once, like the write itself.
    async fn single_tally(&self, content_id: DbId, viewer: Option<&str>) -> Result<VoteTally, CoreError> {
        let mut tallies = self.store.tally_for_set(&[content_id], viewer).await?;
        Ok(tallies.remove(&content_id).unwrap_or_default())
    }

    async fn ensure_content_exists(&self, content_id: DbId) -> Result<(), CoreError> {
        retry_read(&self.retry, "find_content", || self.store.find_by_id(content_id))
            .await?
            .map(|_| ())
            .ok_or(CoreError::NotFound {
                entity: CONTENT_ENTITY,
                id: content_id,
            })
    }
}
