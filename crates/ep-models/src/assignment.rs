//! Assignment record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EmployeeId, ProjectId};

/// One employee's tenure on one project
///
/// `date_to` is always concrete: an ongoing tenure is resolved to a reference
/// date before the record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl AssignmentRecord {
    /// Build a record, or `None` if the tenure ends before it starts
    pub fn new(
        employee_id: EmployeeId,
        project_id: ProjectId,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Option<Self> {
        if date_from > date_to {
            return None;
        }
        Some(Self {
            employee_id,
            project_id,
            date_from,
            date_to,
        })
    }
}
