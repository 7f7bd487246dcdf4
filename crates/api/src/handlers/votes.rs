//! Handlers for thumbs-up/down votes on approved content.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use slangdex_core::types::DbId;
use slangdex_core::vote::VoteType;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /contents/{id}/votes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    /// `THUMBS_UP` or `THUMBS_DOWN`.
    #[serde(default)]
    pub vote_type: String,
}

/// GET /api/v1/contents/{id}/votes
pub async fn get_votes(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let summary = state.votes.summary(id, Some(&user.subject)).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/contents/{id}/votes
///
/// Cast or replace the caller's vote and return the new tally.
pub async fn cast_vote(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CastVoteRequest>,
) -> AppResult<impl IntoResponse> {
    let vote_type = VoteType::parse(input.vote_type.trim())?;
    let summary = state.votes.cast(id, &user.subject, vote_type).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// DELETE /api/v1/contents/{id}/votes
///
/// Remove the caller's vote; a no-op when there is none.
pub async fn clear_vote(
    user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let summary = state.votes.clear(id, &user.subject).await?;
    Ok(Json(DataResponse { data: summary }))
}
