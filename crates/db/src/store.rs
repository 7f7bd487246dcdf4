//! PostgreSQL implementation of the `slangdex-core` store traits.

use std::collections::HashMap;

use slangdex_core::catalog::CONTENT_ENTITY;
use slangdex_core::content::{ContentItem, ContentStatus, NewContent, ReviewRequest};
use slangdex_core::error::CoreError;
use slangdex_core::pagination::PageRequest;
use slangdex_core::store::{ContentStore, ReviewOutcome, VoteStore};
use slangdex_core::types::DbId;
use slangdex_core::vote::{VoteTally, VoteType};

use crate::repositories::{ContentRepo, VoteRepo};
use crate::{storage_error, DbPool};

/// Cloneable store handle over a connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_items(rows: Vec<crate::models::content::ContentRow>) -> Result<Vec<ContentItem>, CoreError> {
    rows.into_iter().map(ContentItem::try_from).collect()
}

fn parse_vote(raw: &str) -> Result<VoteType, CoreError> {
    VoteType::parse(raw).map_err(|_| CoreError::Internal(format!("unknown vote type '{raw}'")))
}

fn parse_status(raw: &str) -> Result<ContentStatus, CoreError> {
    ContentStatus::parse(raw).map_err(|_| CoreError::Internal(format!("unknown content status '{raw}'")))
}

impl ContentStore for PgStore {
    async fn insert(&self, content: &NewContent) -> Result<ContentItem, CoreError> {
        let row = ContentRepo::create(
            &self.pool,
            &content.term,
            &content.definition,
            content.example.as_deref(),
            &content.submitted_by,
        )
        .await
        .map_err(storage_error("insert_content"))?;
        ContentItem::try_from(row)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<ContentItem>, CoreError> {
        ContentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error("find_content"))?
            .map(ContentItem::try_from)
            .transpose()
    }

    async fn list_by_status(&self, status: ContentStatus) -> Result<Vec<ContentItem>, CoreError> {
        let rows = ContentRepo::list_by_status(&self.pool, status.as_str())
            .await
            .map_err(storage_error("list_content"))?;
        to_items(rows)
    }

    async fn page_by_status(
        &self,
        status: ContentStatus,
        request: PageRequest,
    ) -> Result<(Vec<ContentItem>, i64), CoreError> {
        let (rows, total) =
            ContentRepo::page_by_status(&self.pool, status.as_str(), request.limit(), request.offset())
                .await
                .map_err(storage_error("page_content"))?;
        Ok((to_items(rows)?, total))
    }

    async fn find_approved_by_term(&self, normalized_term: &str) -> Result<Vec<ContentItem>, CoreError> {
        let rows = ContentRepo::find_approved_by_term(&self.pool, normalized_term)
            .await
            .map_err(storage_error("find_approved_by_term"))?;
        to_items(rows)
    }

    async fn search_approved(&self, query: &str) -> Result<Vec<ContentItem>, CoreError> {
        let rows = ContentRepo::search_approved(&self.pool, query)
            .await
            .map_err(storage_error("search_approved"))?;
        to_items(rows)
    }

    async fn apply_review(&self, id: DbId, review: &ReviewRequest) -> Result<ReviewOutcome, CoreError> {
        let updated = ContentRepo::review(
            &self.pool,
            id,
            review.decision.target_status().as_str(),
            &review.reviewer,
            review.comment.as_deref(),
        )
        .await
        .map_err(storage_error("review_content"))?;

        if let Some(row) = updated {
            return Ok(ReviewOutcome::Applied(ContentItem::try_from(row)?));
        }

        // Nothing matched: either the row is gone or it already left PENDING.
        match ContentRepo::status_of(&self.pool, id)
            .await
            .map_err(storage_error("content_status"))?
        {
            Some(row) => Ok(ReviewOutcome::AlreadyReviewed(parse_status(&row.status)?)),
            None => Ok(ReviewOutcome::Missing),
        }
    }
}

impl VoteStore for PgStore {
    async fn find_vote(&self, content_id: DbId, voter: &str) -> Result<Option<VoteType>, CoreError> {
        VoteRepo::find_vote(&self.pool, content_id, voter)
            .await
            .map_err(storage_error("find_vote"))?
            .as_deref()
            .map(parse_vote)
            .transpose()
    }

    async fn upsert_vote(&self, content_id: DbId, voter: &str, vote_type: VoteType) -> Result<(), CoreError> {
        match VoteRepo::upsert(&self.pool, content_id, voter, vote_type.as_str()).await {
            Ok(()) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(CoreError::NotFound {
                    entity: CONTENT_ENTITY,
                    id: content_id,
                })
            }
            Err(err) => Err(storage_error("upsert_vote")(err)),
        }
    }

    async fn delete_vote(&self, content_id: DbId, voter: &str) -> Result<bool, CoreError> {
        VoteRepo::delete(&self.pool, content_id, voter)
            .await
            .map_err(storage_error("delete_vote"))
    }

    async fn tally_for_set(
        &self,
        content_ids: &[DbId],
        viewer: Option<&str>,
    ) -> Result<HashMap<DbId, VoteTally>, CoreError> {
        let mut tallies: HashMap<DbId, VoteTally> = content_ids
            .iter()
            .map(|id| (*id, VoteTally::default()))
            .collect();
        if content_ids.is_empty() {
            return Ok(tallies);
        }

        let counts = VoteRepo::tally_for_set(&self.pool, content_ids)
            .await
            .map_err(storage_error("tally_votes"))?;
        for row in counts {
            if let Some(tally) = tallies.get_mut(&row.content_id) {
                tally.thumbs_up = row.thumbs_up;
                tally.thumbs_down = row.thumbs_down;
            }
        }

        if let Some(viewer) = viewer {
            let own = VoteRepo::votes_by_voter(&self.pool, content_ids, viewer)
                .await
                .map_err(storage_error("viewer_votes"))?;
            for row in own {
                if let Some(tally) = tallies.get_mut(&row.content_id) {
                    tally.user_vote = Some(parse_vote(&row.vote_type)?);
                }
            }
        }

        Ok(tallies)
    }
}
