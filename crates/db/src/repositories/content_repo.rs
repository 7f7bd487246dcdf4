//! Repository for the `contents` table.

use sqlx::PgPool;
use slangdex_core::types::DbId;

use crate::models::content::{ContentRow, ContentStatusRow};

/// Column list for contents queries.
const COLUMNS: &str = "id, term, definition, example, status, submitted_by, \
    reviewed_by, review_comment, created_at, updated_at";

/// Provides persistence for submitted content items.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new `PENDING` item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        term: &str,
        definition: &str,
        example: Option<&str>,
        submitted_by: &str,
    ) -> Result<ContentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO contents (term, definition, example, status, submitted_by)
             VALUES ($1, $2, $3, 'PENDING', $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(term)
            .bind(definition)
            .bind(example)
            .bind(submitted_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All rows in `status`, oldest first.
    pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<ContentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contents
             WHERE status = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// One page of rows in `status` plus the status's total count.
    ///
    /// Both statements run in one `REPEATABLE READ` transaction so the
    /// page and the count describe the same snapshot.
    pub async fn page_by_status(
        pool: &PgPool,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ContentRow>, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM contents
             WHERE status = $1
             ORDER BY created_at ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ContentRow>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contents WHERE status = $1")
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((rows, total))
    }

    /// Approved rows whose trimmed, lower-cased term equals `normalized_term`.
    pub async fn find_approved_by_term(
        pool: &PgPool,
        normalized_term: &str,
    ) -> Result<Vec<ContentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contents
             WHERE status = 'APPROVED' AND lower(btrim(term)) = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(normalized_term)
            .fetch_all(pool)
            .await
    }

    /// Approved rows whose term contains `query`, ignoring case.
    ///
    /// Uses `strpos` rather than `LIKE` so `%` and `_` in the query match
    /// literally.
    pub async fn search_approved(pool: &PgPool, query: &str) -> Result<Vec<ContentRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM contents
             WHERE status = 'APPROVED' AND strpos(lower(term), lower($1)) > 0
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ContentRow>(&sql)
            .bind(query)
            .fetch_all(pool)
            .await
    }

    /// Record a review decision on a row that is still `PENDING`.
    ///
    /// Returns `None` when the row is missing or already reviewed; the
    /// status guard in the `WHERE` clause makes concurrent reviews of the
    /// same row mutually exclusive.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
        reviewed_by: &str,
        review_comment: Option<&str>,
    ) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE contents SET
                status = $2,
                reviewed_by = $3,
                review_comment = $4,
                updated_at = now()
             WHERE id = $1 AND status = 'PENDING'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .bind(new_status)
            .bind(reviewed_by)
            .bind(review_comment)
            .fetch_optional(pool)
            .await
    }

    pub async fn status_of(pool: &PgPool, id: DbId) -> Result<Option<ContentStatusRow>, sqlx::Error> {
        sqlx::query_as::<_, ContentStatusRow>("SELECT status FROM contents WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of rows, regardless of status.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contents")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
