//! Error types for moneyhog-core
//!
//! The aggregation engine itself never fails. Errors come from record
//! creation (validation) and from the record store underneath the tracker.

use moneyhog_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Submitted record failed validation
    ValidationError,
    /// Record store failure
    StoreError,
    /// Malformed stored document
    InvalidFormat,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    /// Offending field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            field: None,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_field(mut self, field: String) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, "\nField: {}", field)?;
        }
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Operation rejected, nothing changed
    Warning,
    /// Operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for moneyhog-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::Store(StoreError::MalformedDocument { .. }) => ErrorCode::InvalidFormat,
            CoreError::Store(_) => ErrorCode::StoreError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Validation { .. } => ErrorSeverity::Warning,
            CoreError::Store(_) => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Validation { field, message } => {
                details = details
                    .with_field(field.clone())
                    .with_detail(serde_json::json!({ "validation_message": message }));
            }
            CoreError::Store(StoreError::MalformedDocument { path, .. }) => {
                details = details.with_suggestion(format!(
                    "Check that {} contains valid JSON.",
                    path
                ));
            }
            CoreError::Store(StoreError::Io { path, .. }) => {
                details = details.with_suggestion(format!(
                    "Ensure {} exists and is readable and writable.",
                    path
                ));
                details = details.with_suggestion(
                    "Set data.create_missing to create the data directory on startup.".to_string(),
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Owner the operation ran for
    pub owner: Option<String>,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: String) -> Self {
        Self {
            owner: None,
            operation,
        }
    }

    pub fn with_owner(mut self, owner: String) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "moneyhog::error",
                "[{}] {} - Operation: {} - Owner: {:?}",
                error.code(),
                error,
                context.operation,
                context.owner
            ),
            ErrorSeverity::Error => log::error!(
                target: "moneyhog::error",
                "[{}] {} - Operation: {} - Owner: {:?}",
                error.code(),
                error.to_details(),
                context.operation,
                context.owner
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::StoreError.to_string(), "STORE_ERROR");
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_validation_details() {
        let error = CoreError::validation("amount", "Amount must be greater than 0");
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let details = error.to_details();
        assert_eq!(details.field.as_deref(), Some("amount"));
        assert!(details.details.is_some());
        assert!(details.message.contains("greater than 0"));
    }

    #[test]
    fn test_store_error_code() {
        let error = CoreError::from(StoreError::MalformedDocument {
            path: "data/expenses.json".to_string(),
            message: "expected value".to_string(),
        });
        assert_eq!(error.code(), ErrorCode::InvalidFormat);
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.to_details().suggestions.len(), 1);

        let error = CoreError::from(StoreError::Io {
            path: "data".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(error.code(), ErrorCode::StoreError);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("add_expense".to_string())
            .with_owner("a@b.com".to_string());
        assert_eq!(context.operation, "add_expense");
        assert_eq!(context.owner.as_deref(), Some("a@b.com"));
    }
}
