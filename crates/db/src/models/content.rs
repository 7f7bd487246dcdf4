//! Content item rows.

use slangdex_core::content::{ContentItem, ContentStatus};
use slangdex_core::error::CoreError;
use slangdex_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `contents` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: DbId,
    pub term: String,
    pub definition: String,
    pub example: Option<String>,
    pub status: String,
    pub submitted_by: String,
    pub reviewed_by: Option<String>,
    pub review_comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ContentRow> for ContentItem {
    type Error = CoreError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let status = ContentStatus::parse(&row.status).map_err(|_| {
            CoreError::Internal(format!("content {} has unknown status '{}'", row.id, row.status))
        })?;
        Ok(ContentItem {
            id: row.id,
            term: row.term,
            definition: row.definition,
            example: row.example,
            status,
            submitted_by: row.submitted_by,
            reviewed_by: row.reviewed_by,
            review_comment: row.review_comment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Current status of a row, used to explain why a conditional review
/// update matched nothing.
#[derive(Debug, Clone, FromRow)]
pub struct ContentStatusRow {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn row(status: &str) -> ContentRow {
        let now = chrono::Utc::now();
        ContentRow {
            id: 1,
            term: "Sus".into(),
            definition: "Suspicious".into(),
            example: None,
            status: status.into(),
            submitted_by: "kai".into(),
            reviewed_by: None,
            review_comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn known_status_converts() {
        let item = ContentItem::try_from(row("APPROVED")).unwrap();
        assert_eq!(item.status, ContentStatus::Approved);
        assert_eq!(item.term, "Sus");
    }

    #[test]
    fn unknown_status_is_internal_error() {
        assert_matches!(ContentItem::try_from(row("ARCHIVED")), Err(CoreError::Internal(_)));
    }
}
