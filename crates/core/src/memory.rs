//! In-process implementation of the store traits.
//!
//! Backs the service tests and local runs without PostgreSQL. All state
//! sits behind one mutex, so every trait method is trivially atomic. The
//! lock is never held across an `.await`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::catalog::CONTENT_ENTITY;
use crate::content::{normalize_term, ContentItem, ContentStatus, NewContent, ReviewRequest};
use crate::error::CoreError;
use crate::pagination::PageRequest;
use crate::store::{ContentStore, ReviewOutcome, VoteStore};
use crate::types::DbId;
use crate::vote::{tally_votes, VoteTally, VoteType};

#[derive(Debug, Default)]
struct State {
    next_id: DbId,
    contents: BTreeMap<DbId, ContentItem>,
    votes: HashMap<(DbId, String), VoteType>,
    failing_reads: u32,
    failing_writes: u32,
}

impl State {
    /// Consume one injected read failure, if any are queued.
    fn check_read(&mut self) -> Result<(), CoreError> {
        if self.failing_reads > 0 {
            self.failing_reads -= 1;
            return Err(CoreError::Storage("injected read failure".into()));
        }
        Ok(())
    }

    /// Consume one injected write failure, if any are queued.
    fn check_write(&mut self) -> Result<(), CoreError> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(CoreError::Storage("injected write failure".into()));
        }
        Ok(())
    }

    fn sorted_by_status(&self, status: ContentStatus) -> Vec<ContentItem> {
        let mut items: Vec<ContentItem> = self
            .contents
            .values()
            .filter(|item| item.status == status)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        items
    }
}

/// Cloneable handle to a shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` read calls fail with a transient storage error.
    pub fn fail_next_reads(&self, count: u32) {
        self.lock().failing_reads = count;
    }

    /// Make the next `count` write calls fail with a transient storage error.
    pub fn fail_next_writes(&self, count: u32) {
        self.lock().failing_writes = count;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked mid-call;
        // the maps themselves are never left half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ContentStore for InMemoryStore {
    async fn insert(&self, content: &NewContent) -> Result<ContentItem, CoreError> {
        let mut state = self.lock();
        state.check_write()?;
        state.next_id += 1;
        let now = chrono::Utc::now();
        let item = ContentItem {
            id: state.next_id,
            term: content.term.clone(),
            definition: content.definition.clone(),
            example: content.example.clone(),
            status: ContentStatus::Pending,
            submitted_by: content.submitted_by.clone(),
            reviewed_by: None,
            review_comment: None,
            created_at: now,
            updated_at: now,
        };
        state.contents.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ContentItem>, CoreError> {
        let mut state = self.lock();
        state.check_read()?;
        Ok(state.contents.get(&id).cloned())
    }

    async fn list_by_status(&self, status: ContentStatus) -> Result<Vec<ContentItem>, CoreError> {
        let mut state = self.lock();
        state.check_read()?;
        Ok(state.sorted_by_status(status))
    }

    async fn page_by_status(
        &self,
        status: ContentStatus,
        request: PageRequest,
    ) -> Result<(Vec<ContentItem>, i64), CoreError> {
        let mut state = self.lock();
        state.check_read()?;
        let all = state.sorted_by_status(status);
        let total = all.len() as i64;
        let page = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit()).unwrap_or(0))
            .collect();
        Ok((page, total))
    }

    async fn find_approved_by_term(&self, normalized_term: &str) -> Result<Vec<ContentItem>, CoreError> {
        let mut state = self.lock();
        state.check_read()?;
        Ok(state
            .sorted_by_status(ContentStatus::Approved)
            .into_iter()
            .filter(|item| normalize_term(&item.term) == normalized_term)
            .collect())
    }

    async fn search_approved(&self, query: &str) -> Result<Vec<ContentItem>, CoreError> {
        let mut state = self.lock();
        state.check_read()?;
        let needle = query.to_lowercase();
        Ok(state
            .sorted_by_status(ContentStatus::Approved)
            .into_iter()
            .filter(|item| item.term.to_lowercase().contains(&needle))
            .collect())
    }

    async fn apply_review(&self, id: DbId, review: &ReviewRequest) -> Result<ReviewOutcome, CoreError> {
        let mut state = self.lock();
        state.check_write()?;
        let Some(item) = state.contents.get_mut(&id) else {
            return Ok(ReviewOutcome::Missing);
        };
        let Ok(next) = item.status.apply(review.decision) else {
            return Ok(ReviewOutcome::AlreadyReviewed(item.status));
        };

        item.status = next;
        item.reviewed_by = Some(review.reviewer.clone());
        item.review_comment = review.comment.clone();
        item.updated_at = chrono::Utc::now();
        Ok(ReviewOutcome::Applied(item.clone()))
    }
}

impl VoteStore for InMemoryStore {
    async fn find_vote(&self, content_id: DbId, voter: &str) -> Result<Option<VoteType>, CoreError> {
        let mut state = self.lock();
        state.check_read()?;
        Ok(state.votes.get(&(content_id, voter.to_string())).copied())
    }

    async fn upsert_vote(&self, content_id: DbId, voter: &str, vote_type: VoteType) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.check_write()?;
        if !state.contents.contains_key(&content_id) {
            return Err(CoreError::NotFound {
                entity: CONTENT_ENTITY,
                id: content_id,
            });
        }
        state.votes.insert((content_id, voter.to_string()), vote_type);
        Ok(())
    }

    async fn delete_vote(&self, content_id: DbId, voter: &str) -> Result<bool, CoreError> {
        let mut state = self.lock();
        state.check_write()?;
        Ok(state.votes.remove(&(content_id, voter.to_string())).is_some())
    }

    async fn tally_for_set(
        &self,
        content_ids: &[DbId],
        viewer: Option<&str>,
    ) -> Result<HashMap<DbId, VoteTally>, CoreError> {
        let mut state = self.lock();
        state.check_read()?;
        let votes = state
            .votes
            .iter()
            .map(|((content_id, voter), vote_type)| (*content_id, voter.as_str(), *vote_type));
        Ok(tally_votes(content_ids, votes, viewer))
    }
}
