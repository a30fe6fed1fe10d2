//! Error types for the storage layer.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update addressed an item that does not exist.
    #[error("no item in table {table} for key {key}")]
    ItemNotFound { table: String, key: String },

    /// Item offered to `put` is missing one of the table's key attributes.
    #[error("item for table {table} is missing key attribute {attribute}")]
    MissingKeyAttribute { table: String, attribute: String },

    /// Increment targeted an attribute that holds a non-numeric value.
    #[error("attribute {attribute} is not numeric")]
    NonNumericAttribute { attribute: String },

    /// Query condition named an attribute other than the partition key.
    #[error("key condition on {got} but table partitions on {expected}")]
    KeyConditionMismatch { expected: String, got: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend unavailable (connection loss, throttling, poisoned state).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
