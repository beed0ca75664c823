//! Unified error handling.
//!
//! Provides a single error type for every repository operation, with stable
//! error codes and a serializable body for the CLI output.

use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    DuplicateName(String),

    // Validation
    #[error("Missing params: {0}")]
    MissingParams(String),

    // Ambient failures
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

/// Error body for JSON output
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Get error code for clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateName(_) => "DUPLICATE_NAME",
            AppError::MissingParams(_) => "MISSING_PARAMS",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Input(_) => "INVALID_INPUT",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Check whether the error is a rejected request rather than a fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::DuplicateName(_)
                | AppError::MissingParams(_)
                | AppError::Input(_)
        )
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: ErrorBody {
                code: err.code().to_string(),
                message: err.user_message(),
            },
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(id) => AppError::NotFound(id),
            DomainError::MissingParams(fields) => AppError::MissingParams(fields),
            DomainError::DuplicateName(name) => AppError::DuplicateName(name),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, id: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, id: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(id: impl Into<String>) -> Self {
        AppError::NotFound(id.into())
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        AppError::DuplicateName(name.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_kind() {
        let err: AppError = DomainError::missing_params("city").into();
        assert!(matches!(err, AppError::MissingParams(ref f) if f == "city"));
        assert_eq!(err.code(), "MISSING_PARAMS");

        let err: AppError = DomainError::not_found("1234").into();
        assert_eq!(err.code(), "NOT_FOUND");

        let err: AppError = DomainError::duplicate_name("jest").into();
        assert_eq!(err.code(), "DUPLICATE_NAME");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = AppError::internal("lock poisoned");
        assert_eq!(err.user_message(), "An internal error occurred");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        let err = missing.ok_or_not_found("missing-id").unwrap_err();
        assert_eq!(err.to_string(), "User not found: missing-id");
    }

    #[test]
    fn test_error_response_shape() {
        let err = AppError::duplicate_name("jest");
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(json["error"]["code"], "DUPLICATE_NAME");
        assert_eq!(json["error"]["message"], "User already exists: jest");
    }
}
