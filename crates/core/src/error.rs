use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the failure may succeed on a later attempt.
    ///
    /// Only storage failures qualify; everything else is a verdict about the
    /// request itself.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::Storage(_))
    }
}

/// Flatten field-level validation failures into one message such as
/// `"definition: must be 1-500 characters; term: must be 1-100 characters"`.
///
/// Fields are sorted so the message is stable across runs.
impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect();
        parts.sort();
        CoreError::Validation(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(CoreError::Storage("connection reset".into()).is_transient());
        assert!(!CoreError::Validation("term".into()).is_transient());
        assert!(!CoreError::InvalidState("already reviewed".into()).is_transient());
        assert!(!CoreError::NotFound { entity: "Content", id: 1 }.is_transient());
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound { entity: "Content", id: 7 };
        assert_eq!(err.to_string(), "Entity not found: Content with id 7");
    }
}
