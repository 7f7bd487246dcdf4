//! Route definitions for content, review and votes.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{content, review, votes};
use crate::state::AppState;

/// Routes mounted at `/contents`.
///
/// ```text
/// POST   /                          submit_content
/// GET    /duplicates                find_duplicates
/// GET    /approved                  list_approved
/// GET    /approved-with-votes       list_approved_with_votes
/// GET    /pending                   list_pending
/// GET    /pending/paginated         list_pending_paginated
/// GET    /{id}                      get_content
/// PUT    /{id}/review               review_content
/// POST   /{id}/approve              approve_content
/// POST   /{id}/reject               reject_content
/// GET    /{id}/votes                get_votes
/// POST   /{id}/votes                cast_vote
/// DELETE /{id}/votes                clear_vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(content::submit_content))
        .route("/duplicates", get(content::find_duplicates))
        .route("/approved", get(content::list_approved))
        .route(
            "/approved-with-votes",
            get(content::list_approved_with_votes),
        )
        .route("/pending", get(review::list_pending))
        .route("/pending/paginated", get(review::list_pending_paginated))
        .route("/{id}", get(content::get_content))
        .route("/{id}/review", put(review::review_content))
        .route("/{id}/approve", post(review::approve_content))
        .route("/{id}/reject", post(review::reject_content))
        .route(
            "/{id}/votes",
            get(votes::get_votes)
                .post(votes::cast_vote)
                .delete(votes::clear_vote),
        )
}
