//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role fails
//! the matching predicate from `slangdex_core::roles`. Handlers never
//! compare role names themselves.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use slangdex_core::error::CoreError;
use slangdex_core::roles::{can_contribute, can_moderate};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role allowed to submit terms. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn submit(RequireContributor(user): RequireContributor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireContributor(pub AuthUser);

impl FromRequestParts<AppState> for RequireContributor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_contribute(user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Contributor role required".into(),
            )));
        }
        Ok(RequireContributor(user))
    }
}

/// Requires a role allowed to review terms. Rejects with 403 Forbidden otherwise.
pub struct RequireModerator(pub AuthUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_moderate(user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Moderator role required".into(),
            )));
        }
        Ok(RequireModerator(user))
    }
}
