use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A single field-level validation violation.
///
/// Mirrors the shape returned to API clients in the `errors` array:
/// the offending field name plus a human-readable constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Query parameter or body field that failed validation
    pub field: String,
    /// Description of the violated constraint
    pub constraint: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// One or more field-level violations, reported together.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn validation(field: &str, constraint: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, constraint)])
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
