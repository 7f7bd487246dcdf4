//! Vote rows and aggregates.

use slangdex_core::types::DbId;
use sqlx::FromRow;

/// Per-item vote counts from a grouped aggregate over `content_votes`.
#[derive(Debug, Clone, FromRow)]
pub struct TallyRow {
    pub content_id: DbId,
    pub thumbs_up: i64,
    pub thumbs_down: i64,
}

/// One voter's vote on one item.
#[derive(Debug, Clone, FromRow)]
pub struct VoterVoteRow {
    pub content_id: DbId,
    pub vote_type: String,
}
