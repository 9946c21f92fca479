//! Store error types.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the embedded store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying sled failure.
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No rate row exists for the requested kind.
    #[error("No rate configured for `{0}`")]
    MissingRate(String),

    /// Input rejected before touching the database.
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        /// Name of the rejected argument.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },
}

impl StoreError {
    /// Creates an input validation error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

impl From<sled::transaction::TransactionError<Self>> for StoreError {
    fn from(err: sled::transaction::TransactionError<Self>) -> Self {
        match err {
            sled::transaction::TransactionError::Abort(inner) => inner,
            sled::transaction::TransactionError::Storage(inner) => Self::Database(inner),
        }
    }
}
