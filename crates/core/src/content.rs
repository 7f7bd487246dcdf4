//! Content items, their status machine, and submission/review validation.
//!
//! A content item is a submitted slang term. It is created `PENDING` and is
//! moved exactly once, by a review decision, to `APPROVED` or `REJECTED`.
//! Both of those states are terminal and the term, definition and example
//! never change after creation.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Identity, Timestamp};

// ---------------------------------------------------------------------------
// Status machine
// ---------------------------------------------------------------------------

/// Moderation status of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    Pending,
    Approved,
    Rejected,
}

impl ContentStatus {
    /// The persisted representation (`"PENDING"`, `"APPROVED"`, `"REJECTED"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Pending => "PENDING",
            ContentStatus::Approved => "APPROVED",
            ContentStatus::Rejected => "REJECTED",
        }
    }

    /// Parse the persisted representation. Matching is exact.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "PENDING" => Ok(ContentStatus::Pending),
            "APPROVED" => Ok(ContentStatus::Approved),
            "REJECTED" => Ok(ContentStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid content status '{other}'. Must be one of: PENDING, APPROVED, REJECTED"
            ))),
        }
    }

    /// The status reached by applying `decision` to an item in this status.
    ///
    /// Only `PENDING` items can be reviewed.
    pub fn apply(self, decision: Decision) -> Result<ContentStatus, CoreError> {
        match self {
            ContentStatus::Pending => Ok(decision.target_status()),
            reviewed => Err(CoreError::InvalidState(format!(
                "Content already reviewed (status {reviewed})"
            ))),
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A moderator's verdict on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Parse a client-supplied decision.
    ///
    /// Accepts `APPROVE`/`APPROVED`/`REJECT`/`REJECTED` in any case, ignoring
    /// surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "APPROVE" | "APPROVED" => Ok(Decision::Approve),
            "REJECT" | "REJECTED" => Ok(Decision::Reject),
            "" => Err(CoreError::Validation("decision is required".into())),
            _ => Err(CoreError::Validation(
                "decision must be APPROVE/APPROVED or REJECT/REJECTED".into(),
            )),
        }
    }

    pub fn target_status(self) -> ContentStatus {
        match self {
            Decision::Approve => ContentStatus::Approved,
            Decision::Reject => ContentStatus::Rejected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::Reject => "REJECT",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A persisted content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: DbId,
    pub term: String,
    pub definition: String,
    pub example: Option<String>,
    pub status: ContentStatus,
    pub submitted_by: Identity,
    pub reviewed_by: Option<Identity>,
    pub review_comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A validated submission, ready to be inserted as `PENDING`.
///
/// Build it with [`NewContent::new`]; all text fields are trimmed and an
/// empty example is dropped before the length rules run.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewContent {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub term: String,
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    pub definition: String,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub example: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub submitted_by: Identity,
}

impl NewContent {
    pub fn new(
        term: &str,
        definition: &str,
        example: Option<&str>,
        submitted_by: &str,
    ) -> Result<Self, CoreError> {
        let submission = Self {
            term: term.trim().to_string(),
            definition: definition.trim().to_string(),
            example: non_blank(example),
            submitted_by: submitted_by.trim().to_string(),
        };
        submission.validate()?;
        Ok(submission)
    }
}

/// A validated review decision.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ReviewRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub reviewer: Identity,
    pub decision: Decision,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub comment: Option<String>,
}

impl ReviewRequest {
    /// Validate reviewer and comment. A blank comment becomes `None`.
    ///
    /// Whether a rejection must carry a comment is a caller convention and
    /// is checked separately by [`require_rejection_comment`].
    pub fn new(reviewer: &str, decision: Decision, comment: Option<&str>) -> Result<Self, CoreError> {
        let request = Self {
            reviewer: reviewer.trim().to_string(),
            decision,
            comment: non_blank(comment),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Rejections must explain themselves to the submitter.
pub fn require_rejection_comment(decision: Decision, comment: Option<&str>) -> Result<(), CoreError> {
    let has_comment = comment.is_some_and(|c| !c.trim().is_empty());
    if decision == Decision::Reject && !has_comment {
        return Err(CoreError::Validation(
            "reviewComment is required when rejecting content".into(),
        ));
    }
    Ok(())
}

/// Key used to compare terms for duplicates: trimmed and lower-cased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_round_trips_through_persisted_form() {
        for status in [
            ContentStatus::Pending,
            ContentStatus::Approved,
            ContentStatus::Rejected,
        ] {
            assert_eq!(ContentStatus::parse(status.as_str()).unwrap(), status);
        }
        assert_matches!(ContentStatus::parse("pending"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn pending_is_the_only_reviewable_status() {
        assert_eq!(
            ContentStatus::Pending.apply(Decision::Approve).unwrap(),
            ContentStatus::Approved
        );
        assert_eq!(
            ContentStatus::Pending.apply(Decision::Reject).unwrap(),
            ContentStatus::Rejected
        );
        assert_matches!(
            ContentStatus::Approved.apply(Decision::Reject),
            Err(CoreError::InvalidState(_))
        );
        assert_matches!(
            ContentStatus::Rejected.apply(Decision::Approve),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn decision_accepts_aliases_in_any_case() {
        assert_eq!(Decision::parse("approve").unwrap(), Decision::Approve);
        assert_eq!(Decision::parse(" APPROVED ").unwrap(), Decision::Approve);
        assert_eq!(Decision::parse("Reject").unwrap(), Decision::Reject);
        assert_eq!(Decision::parse("rejected").unwrap(), Decision::Reject);
    }

    #[test]
    fn decision_rejects_blank_and_unknown_values() {
        let blank = Decision::parse("  ").unwrap_err();
        assert_eq!(blank.to_string(), "Validation failed: decision is required");
        assert_matches!(Decision::parse("flag"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn submission_is_trimmed_and_blank_example_dropped() {
        let submission = NewContent::new("  mid ", " average ", Some("   "), " kai ").unwrap();
        assert_eq!(submission.term, "mid");
        assert_eq!(submission.definition, "average");
        assert_eq!(submission.example, None);
        assert_eq!(submission.submitted_by, "kai");
    }

    #[test]
    fn blank_term_is_rejected_with_field_message() {
        let err = NewContent::new("   ", "average", None, "kai").unwrap_err();
        assert_matches!(&err, CoreError::Validation(msg) if msg.contains("term"));
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let long_term = "x".repeat(101);
        assert_matches!(
            NewContent::new(&long_term, "average", None, "kai"),
            Err(CoreError::Validation(msg)) if msg.starts_with("term:")
        );

        let long_definition = "y".repeat(501);
        assert_matches!(
            NewContent::new("mid", &long_definition, None, "kai"),
            Err(CoreError::Validation(msg)) if msg.starts_with("definition:")
        );

        let long_example = "z".repeat(501);
        assert_matches!(
            NewContent::new("mid", "average", Some(&long_example), "kai"),
            Err(CoreError::Validation(msg)) if msg.starts_with("example:")
        );
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let emoji_term = "🔥".repeat(100);
        assert!(NewContent::new(&emoji_term, "fire", None, "kai").is_ok());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let err = NewContent::new("", "", None, "kai").unwrap_err();
        let CoreError::Validation(msg) = err else {
            panic!("expected a validation error");
        };
        assert!(msg.contains("definition:"));
        assert!(msg.contains("term:"));
    }

    #[test]
    fn review_request_requires_reviewer() {
        assert_matches!(
            ReviewRequest::new("  ", Decision::Approve, None),
            Err(CoreError::Validation(msg)) if msg.starts_with("reviewer:")
        );
        let request = ReviewRequest::new("mod1", Decision::Approve, Some("  ")).unwrap();
        assert_eq!(request.comment, None);
    }

    #[test]
    fn rejection_needs_a_comment_but_approval_does_not() {
        assert!(require_rejection_comment(Decision::Approve, None).is_ok());
        assert!(require_rejection_comment(Decision::Reject, Some("offensive")).is_ok());
        assert_matches!(
            require_rejection_comment(Decision::Reject, Some(" ")),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            require_rejection_comment(Decision::Reject, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn normalized_terms_ignore_case_and_padding() {
        assert_eq!(normalize_term("  RIZZ "), "rizz");
        assert_eq!(normalize_term("Rizz"), normalize_term("rizz"));
    }

    #[test]
    fn content_item_serializes_camel_case() {
        let now = chrono::Utc::now();
        let item = ContentItem {
            id: 1,
            term: "Drip".into(),
            definition: "Cool style or outfit".into(),
            example: None,
            status: ContentStatus::Pending,
            submitted_by: "mila".into(),
            reviewed_by: None,
            review_comment: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["submittedBy"], "mila");
        assert!(json["reviewedBy"].is_null());
        assert!(json.get("createdAt").is_some());
    }
}
