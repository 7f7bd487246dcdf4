//! Roles supplied by the identity provider and the two authorization
//! predicates every entry point uses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_LEARNER: &str = "LEARNER";
pub const ROLE_CONTRIBUTOR: &str = "CONTRIBUTOR";
pub const ROLE_MODERATOR: &str = "MODERATOR";
pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Learner,
    Contributor,
    Moderator,
    Admin,
}

impl Role {
    /// Parse a role claim. Case-insensitive.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_uppercase().as_str() {
            ROLE_LEARNER => Ok(Role::Learner),
            ROLE_CONTRIBUTOR => Ok(Role::Contributor),
            ROLE_MODERATOR => Ok(Role::Moderator),
            ROLE_ADMIN => Ok(Role::Admin),
            _ => Err(CoreError::Unauthorized(format!("Unknown role '{value}'"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Learner => ROLE_LEARNER,
            Role::Contributor => ROLE_CONTRIBUTOR,
            Role::Moderator => ROLE_MODERATOR,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may submit new terms.
pub fn can_contribute(role: Role) -> bool {
    matches!(role, Role::Contributor | Role::Moderator | Role::Admin)
}

/// Who may review pending terms.
pub fn can_moderate(role: Role) -> bool {
    matches!(role, Role::Moderator | Role::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("moderator").unwrap(), Role::Moderator);
        assert_eq!(Role::parse("ADMIN").unwrap(), Role::Admin);
        assert!(Role::parse("superuser").is_err());
    }

    #[test]
    fn learners_can_neither_contribute_nor_moderate() {
        assert!(!can_contribute(Role::Learner));
        assert!(!can_moderate(Role::Learner));
    }

    #[test]
    fn contributors_can_submit_but_not_review() {
        assert!(can_contribute(Role::Contributor));
        assert!(!can_moderate(Role::Contributor));
    }

    #[test]
    fn moderators_and_admins_can_do_both() {
        for role in [Role::Moderator, Role::Admin] {
            assert!(can_contribute(role));
            assert!(can_moderate(role));
        }
    }
}
