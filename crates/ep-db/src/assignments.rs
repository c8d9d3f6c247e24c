//! PostgreSQL assignment store
//!
//! Rows live in `employee_projects`. A NULL `date_to` marks an ongoing tenure
//! and is resolved to the current date when read back.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use ep_models::AssignmentRecord;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::repository::{AssignmentStore, RepositoryError, RepositoryResult};

/// Rows per INSERT statement; four binds each keeps us far below the
/// PostgreSQL bind parameter limit.
const INSERT_CHUNK: usize = 1000;

/// Assignment database entity
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub id: i64,
    pub emp_id: i32,
    pub project_id: i32,
    pub date_from: NaiveDate,
    pub date_to: Option<NaiveDate>,
}

impl AssignmentRow {
    /// Convert to a record, resolving an open end date to `today`
    pub fn into_record(self, today: NaiveDate) -> RepositoryResult<AssignmentRecord> {
        let date_to = self.date_to.unwrap_or(today);
        AssignmentRecord::new(self.emp_id, self.project_id, self.date_from, date_to).ok_or_else(
            || RepositoryError::InvalidRow {
                id: self.id,
                message: format!("date_from {} is after date_to {}", self.date_from, date_to),
            },
        )
    }
}

/// Assignment store backed by PostgreSQL
#[derive(Clone)]
pub struct PgAssignmentStore {
    pool: PgPool,
}

impl PgAssignmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for PgAssignmentStore {
    async fn replace_all(&self, records: &[AssignmentRecord]) -> RepositoryResult<u64> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM employee_projects")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for chunk in records.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO employee_projects (emp_id, project_id, date_from, date_to) ",
            );
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(record.employee_id)
                    .push_bind(record.project_id)
                    .push_bind(record.date_from)
                    .push_bind(record.date_to);
            });
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(deleted, inserted, "Replaced stored assignments");
        Ok(inserted)
    }

    async fn find_all_ordered(&self) -> RepositoryResult<Vec<AssignmentRecord>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, emp_id, project_id, date_from, date_to
            FROM employee_projects
            ORDER BY emp_id ASC, project_id ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let today = Local::now().date_naive();
        rows.into_iter().map(|row| row.into_record(today)).collect()
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee_projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
