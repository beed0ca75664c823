//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (storage, CLI).

use thiserror::Error;
use validator::ValidationErrors;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No active record with the given id
    #[error("User not found: {0}")]
    NotFound(String),

    /// A required creation field is absent or empty
    #[error("Missing params: {0}")]
    MissingParams(String),

    /// An active user already holds the name
    #[error("User already exists: {0}")]
    DuplicateName(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        DomainError::NotFound(id.into())
    }

    /// Create a missing params error
    pub fn missing_params(fields: impl Into<String>) -> Self {
        DomainError::MissingParams(fields.into())
    }

    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        DomainError::DuplicateName(name.into())
    }
}

/// Every validation failure on creation input means a required field was
/// left empty, so the offending field names are reported together.
impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        DomainError::MissingParams(fields.join(", "))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
