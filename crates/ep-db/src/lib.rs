//! # ep-db
//!
//! Storage layer for Employee Pairs.
//!
//! - Connection pool management
//! - The `AssignmentStore` seam with PostgreSQL and in-memory backends
//! - Idempotent schema setup
//!
//! ## Example
//!
//! ```ignore
//! use ep_db::{AssignmentStore, Database, PgAssignmentStore};
//!
//! let db = Database::connect(&config.database).await?;
//! ep_db::schema::ensure_schema(db.pool()).await?;
//!
//! let store = PgAssignmentStore::new(db.pool().clone());
//! store.replace_all(&records).await?;
//! ```

pub mod assignments;
pub mod memory;
pub mod pool;
pub mod repository;
pub mod schema;

// Re-exports
pub use assignments::{AssignmentRow, PgAssignmentStore};
pub use memory::MemoryAssignmentStore;
pub use pool::Database;
pub use repository::{AssignmentStore, RepositoryError, RepositoryResult};
