//! In-memory assignment store
//!
//! Used by tests, the offline tooling and `EMPLOYEE_PAIRS_STORAGE=memory`.

use async_trait::async_trait;
use ep_models::AssignmentRecord;
use tokio::sync::RwLock;

use crate::repository::{AssignmentStore, RepositoryResult};

/// Assignment store holding the current batch in process memory
#[derive(Default)]
pub struct MemoryAssignmentStore {
    records: RwLock<Vec<AssignmentRecord>>,
}

impl MemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentStore for MemoryAssignmentStore {
    async fn replace_all(&self, records: &[AssignmentRecord]) -> RepositoryResult<u64> {
        let mut stored = self.records.write().await;
        stored.clear();
        stored.extend_from_slice(records);
        Ok(stored.len() as u64)
    }

    async fn find_all_ordered(&self) -> RepositoryResult<Vec<AssignmentRecord>> {
        let mut records = self.records.read().await.clone();
        // Stable, so records sharing (employee, project) keep upload order
        records.sort_by_key(|r| (r.employee_id, r.project_id));
        Ok(records)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.records.read().await.len() as i64)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
