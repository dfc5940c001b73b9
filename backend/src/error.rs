//! Engine error handling
//!
//! Insufficient data is never an error: services return `Ok(None)` or
//! `Ok(false)` for that. Errors here are store failures, malformed documents
//! and rejected input. The engine never retries; callers decide.

use fitplan_shared::{DocumentError, ValidationError};
use thiserror::Error;
use tracing::error;

/// Failure talking to the external document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document path: {0}")]
    InvalidPath(String),
}

/// Error type returned by every engine service
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Concurrent update lost: {0}")]
    Conflict(String),
}

impl EngineError {
    /// Short machine-readable code for the UI layer
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Store(StoreError::Unavailable(_)) => "STORE_UNAVAILABLE",
            EngineError::Store(_) => "STORE_ERROR",
            EngineError::Document(_) => "INVALID_DOCUMENT",
            EngineError::Validation(_) => "VALIDATION_ERROR",
            EngineError::Conflict(_) => "CONFLICT",
        }
    }

    /// Whether retrying the whole operation could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::Store(StoreError::Unavailable(_)) | EngineError::Conflict(_)
        )
    }

    /// Log and pass through, for use in `map_err`
    pub fn logged(self) -> Self {
        match &self {
            EngineError::Store(err) => error!(code = self.code(), "Store error: {}", err),
            EngineError::Document(err) => error!(code = self.code(), "Document error: {}", err),
            _ => {}
        }
        self
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for engine services
pub type EngineResult<T> = Result<T, EngineError>;
