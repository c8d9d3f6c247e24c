//! Schema setup

use sqlx::PgPool;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employee_projects (
    id         BIGSERIAL PRIMARY KEY,
    emp_id     INTEGER NOT NULL,
    project_id INTEGER NOT NULL,
    date_from  DATE NOT NULL,
    date_to    DATE
)
"#;

const CREATE_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_employee_projects_emp_project
    ON employee_projects (emp_id, project_id)
"#;

/// Create the assignment table and its index if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    sqlx::query(CREATE_INDEX).execute(pool).await?;
    tracing::debug!("employee_projects schema ready");
    Ok(())
}
