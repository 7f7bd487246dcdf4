//! Repository for the `content_votes` table.

use sqlx::PgPool;
use slangdex_core::types::DbId;

use crate::models::vote::{TallyRow, VoterVoteRow};

/// Provides persistence for per-voter votes.
pub struct VoteRepo;

impl VoteRepo {
    /// The stored vote type for one voter on one item.
    pub async fn find_vote(
        pool: &PgPool,
        content_id: DbId,
        voter_id: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT vote_type FROM content_votes WHERE content_id = $1 AND voter_id = $2",
        )
        .bind(content_id)
        .bind(voter_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(vote_type,)| vote_type))
    }

    /// Insert or replace a vote keyed on `(content_id, voter_id)`.
    ///
    /// Re-casting the same type matches the conflict but updates nothing.
    pub async fn upsert(
        pool: &PgPool,
        content_id: DbId,
        voter_id: &str,
        vote_type: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO content_votes (content_id, voter_id, vote_type) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (content_id, voter_id) \
             DO UPDATE SET vote_type = EXCLUDED.vote_type, updated_at = now() \
             WHERE content_votes.vote_type <> EXCLUDED.vote_type",
        )
        .bind(content_id)
        .bind(voter_id)
        .bind(vote_type)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a voter's vote.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, content_id: DbId, voter_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_votes WHERE content_id = $1 AND voter_id = $2")
            .bind(content_id)
            .bind(voter_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Vote counts for every item in `content_ids` that has at least one vote.
    pub async fn tally_for_set(pool: &PgPool, content_ids: &[DbId]) -> Result<Vec<TallyRow>, sqlx::Error> {
        sqlx::query_as::<_, TallyRow>(
            "SELECT content_id,
                    COUNT(*) FILTER (WHERE vote_type = 'THUMBS_UP') AS thumbs_up,
                    COUNT(*) FILTER (WHERE vote_type = 'THUMBS_DOWN') AS thumbs_down
             FROM content_votes
             WHERE content_id = ANY($1)
             GROUP BY content_id",
        )
        .bind(content_ids)
        .fetch_all(pool)
        .await
    }

    /// One voter's votes across `content_ids`.
    pub async fn votes_by_voter(
        pool: &PgPool,
        content_ids: &[DbId],
        voter_id: &str,
    ) -> Result<Vec<VoterVoteRow>, sqlx::Error> {
        sqlx::query_as::<_, VoterVoteRow>(
            "SELECT content_id, vote_type FROM content_votes
             WHERE content_id = ANY($1) AND voter_id = $2",
        )
        .bind(content_ids)
        .bind(voter_id)
        .fetch_all(pool)
        .await
    }
}
