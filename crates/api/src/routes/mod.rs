pub mod content;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contents                                  submit (POST, contributor)
/// /contents/duplicates                       duplicate-term check (contributor)
/// /contents/approved                         dictionary, optional ?q= search
/// /contents/approved-with-votes              dictionary with tallies
/// /contents/pending                          whole queue (moderator)
/// /contents/pending/paginated                queue page (moderator)
/// /contents/{id}                             get by id
/// /contents/{id}/review                      decide (PUT, moderator)
/// /contents/{id}/approve                     approve (POST, moderator)
/// /contents/{id}/reject                      reject (POST, moderator)
/// /contents/{id}/votes                       tally, cast (POST), clear (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/contents", content::router())
}
