use serde::Serialize;

use crate::types::DbId;

/// A single rejected input field, reported back to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending form field.
    pub field: String,
    /// Machine-readable rule identifier (e.g. `range`, `invalid_location`).
    pub code: String,
    /// Human-readable message suitable for display next to the field.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid fields: {}", join_fields(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fields_display_lists_every_field() {
        let err = CoreError::InvalidFields(vec![
            FieldError::new("species", "length", "Species is required"),
            FieldError::new("notes", "length", "Notes are required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid fields: species: Species is required; notes: Notes are required"
        );
    }
}
