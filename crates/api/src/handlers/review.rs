//! Handlers for the moderator review queue.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use slangdex_core::content::Decision;
use slangdex_core::pagination::PageRequest;
use slangdex_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::rbac::RequireModerator;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /contents/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewContentRequest {
    /// `APPROVE`/`APPROVED` or `REJECT`/`REJECTED`, any case.
    #[serde(default)]
    pub decision: String,
    pub comment: Option<String>,
}

/// Request body for `POST /contents/{id}/approve`.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveContentRequest {
    pub comment: Option<String>,
}

/// Request body for `POST /contents/{id}/reject`. The comment is required.
#[derive(Debug, Deserialize)]
pub struct RejectContentRequest {
    #[serde(default)]
    pub comment: String,
}

/// GET /api/v1/contents/pending
///
/// The whole queue, oldest first.
pub async fn list_pending(
    RequireModerator(_user): RequireModerator,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state.queue.list_pending().await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/contents/pending/paginated?page=&size=
pub async fn list_pending_paginated(
    RequireModerator(_user): RequireModerator,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<impl IntoResponse> {
    let request = PageRequest::new(params.page, params.size)?;
    let page = state.queue.get_pending_page(request).await?;
    Ok(Json(DataResponse { data: page }))
}

/// PUT /api/v1/contents/{id}/review
///
/// Apply a decision; the reviewer recorded is the caller.
pub async fn review_content(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<ReviewContentRequest>,
) -> AppResult<impl IntoResponse> {
    let decision = Decision::parse(&input.decision)?;
    let item = state
        .queue
        .review(id, &user.subject, decision, input.comment.as_deref())
        .await?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/contents/{id}/approve
///
/// The body is optional; without one the approval carries no comment.
pub async fn approve_content(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    body: Option<ApiJson<ApproveContentRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|ApiJson(input)| input).unwrap_or_default();
    let item = state
        .queue
        .approve(id, &user.subject, input.comment.as_deref())
        .await?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/contents/{id}/reject
pub async fn reject_content(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<RejectContentRequest>,
) -> AppResult<impl IntoResponse> {
    let item = state.queue.reject(id, &user.subject, &input.comment).await?;
    Ok(Json(DataResponse { data: item }))
}
