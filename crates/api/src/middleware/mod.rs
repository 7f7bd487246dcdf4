//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated identity and role from a JWT Bearer token.
//! - [`rbac::RequireContributor`] -- Requires a role that may submit terms.
//! - [`rbac::RequireModerator`] -- Requires a role that may review terms.

pub mod auth;
pub mod rbac;
