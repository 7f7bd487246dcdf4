//! Handlers for submitting and reading dictionary content.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use slangdex_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireContributor;
use crate::query::{DuplicateParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /contents`. The submitter is the caller.
///
/// Missing text fields deserialize as empty and fail validation with a
/// field-level message rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct SubmitContentRequest {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub definition: String,
    pub example: Option<String>,
}

/// POST /api/v1/contents
///
/// Submit a new term for review. The item is created in `PENDING`.
pub async fn submit_content(
    RequireContributor(user): RequireContributor,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubmitContentRequest>,
) -> AppResult<impl IntoResponse> {
    let item = state
        .catalog
        .submit(
            &input.term,
            &input.definition,
            input.example.as_deref(),
            &user.subject,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/contents/duplicates?term=
///
/// Approved items whose term equals `term` ignoring case and surrounding
/// whitespace. Advisory: submission is never blocked by a match.
pub async fn find_duplicates(
    RequireContributor(_user): RequireContributor,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DuplicateParams>,
) -> AppResult<impl IntoResponse> {
    let matches = state.duplicates.find_existing_approved(&params.term).await?;
    Ok(Json(DataResponse { data: matches }))
}

/// GET /api/v1/contents/approved?q=
///
/// The dictionary. With `q`, only terms containing it (ignoring case).
pub async fn list_approved(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let items = match params.q.as_deref() {
        Some(query) => state.catalog.search_approved(query).await?,
        None => state.catalog.list_approved().await?,
    };
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/contents/approved-with-votes
///
/// Every approved item with its tally and the caller's own vote.
pub async fn list_approved_with_votes(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = state.votes.approved_with_votes(Some(&user.subject)).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/contents/{id}
pub async fn get_content(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = state.catalog.get_by_id(id).await?;
    Ok(Json(DataResponse { data: item }))
}
