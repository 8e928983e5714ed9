//! Error types for bibgraph
//!
//! Provides the run-level error taxonomy with:
//! - Distinct error types for each failure mode of a batch run
//! - Process exit code mapping
//! - Error codes for machine-readable reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Invocation errors (1xxx)
    UsageError,

    // Input errors (2xxx)
    DirectoryAccessError,
    ExtractionError,

    // Output errors (3xxx)
    SerializationError,
    WriteError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::UsageError => 1001,

            ErrorCode::DirectoryAccessError => 2001,
            ErrorCode::ExtractionError => 2002,

            ErrorCode::SerializationError => 3001,
            ErrorCode::WriteError => 3002,

            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Cannot access input directory {path}: {message}")]
    DirectoryAccess { path: String, message: String },

    #[error("Extraction failed for {file_path}: {cause}")]
    Extraction { file_path: String, cause: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Usage { .. } => ErrorCode::UsageError,
            AppError::DirectoryAccess { .. } => ErrorCode::DirectoryAccessError,
            AppError::Extraction { .. } => ErrorCode::ExtractionError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Write { .. } => ErrorCode::WriteError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Internal { .. } | AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.code() {
            ErrorCode::UsageError => 2,
            ErrorCode::DirectoryAccessError => 3,
            ErrorCode::ExtractionError => 4,
            ErrorCode::SerializationError | ErrorCode::WriteError => 5,
            ErrorCode::ConfigurationError => 6,
            ErrorCode::InternalError => 1,
        }
    }

    /// Whether the failure came from the invocation or the input corpus
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::UsageError | ErrorCode::DirectoryAccessError | ErrorCode::ExtractionError
        )
    }
}

impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::Extraction {
            file_path: "corpus/a.xml".into(),
            cause: "unexpected end of input".into(),
        };
        assert_eq!(err.code(), ErrorCode::ExtractionError);
        assert_eq!(err.code().as_code(), 2002);
        assert_eq!(err.exit_code(), 4);
        assert!(err.is_input_error());
    }

    #[test]
    fn test_usage_error() {
        let err = AppError::Usage {
            message: "missing author output path".into(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("missing author output path"));
    }

    #[test]
    fn test_write_error_is_not_input_error() {
        let err = AppError::Write {
            path: "out/citations.json".into(),
            message: "permission denied".into(),
        };
        assert_eq!(err.code(), ErrorCode::WriteError);
        assert_eq!(err.exit_code(), 5);
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::DirectoryAccessError).unwrap();
        assert_eq!(json, "\"DIRECTORY_ACCESS_ERROR\"");
    }
}
