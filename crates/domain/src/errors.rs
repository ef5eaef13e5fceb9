//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PaceLedger
///
/// `Validation`, `Overlap` and `NotFound` are caller errors and are never
/// retried; `Database` and `Internal` wrap unexpected failures whose detail
/// is suppressed outside development builds.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum PaceLedgerError {
    #[error("Validation error for field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Effective interval overlaps an existing record: {0}")]
    Overlap(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaceLedgerError {
    /// Create a validation error tagged with the offending field
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// True for errors the caller must correct before retrying
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::Overlap(_)
                | Self::NotFound(_)
                | Self::Unauthorized(_)
                | Self::Forbidden(_)
        )
    }
}

/// Result type alias for PaceLedger operations
pub type Result<T> = std::result::Result<T, PaceLedgerError>;
