//! Store error types.

/// Errors from the persistent store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
