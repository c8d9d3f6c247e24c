//! Storage seam for assignment records
//!
//! Every upload replaces the whole stored batch, and analysis always reads the
//! whole batch back, so the store only needs those two operations plus a few
//! probes for health checks.

use async_trait::async_trait;
use ep_models::AssignmentRecord;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid stored row {id}: {message}")]
    InvalidRow { id: i64, message: String },
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistent home of the current assignment batch
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Discard every stored record and store `records` in their place.
    ///
    /// Readers observe either the previous batch or the new one, never a mix.
    async fn replace_all(&self, records: &[AssignmentRecord]) -> RepositoryResult<u64>;

    /// All stored records, ordered by employee id then project id
    async fn find_all_ordered(&self) -> RepositoryResult<Vec<AssignmentRecord>>;

    /// Number of stored records
    async fn count(&self) -> RepositoryResult<i64>;

    /// Check that the backend is reachable
    async fn ping(&self) -> RepositoryResult<()>;

    /// Short backend name for logs and health reports
    fn backend(&self) -> &'static str;
}
