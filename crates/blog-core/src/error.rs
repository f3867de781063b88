//! Domain-level error types.

use thiserror::Error;

/// Domain errors - rejected input on model construction.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl DomainError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::MissingField(field) => field,
            DomainError::InvalidField { field, .. } => field,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
