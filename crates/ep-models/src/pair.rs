//! Pair key and overlap result types

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EmployeeId, ProjectId};

/// Order-independent identifier for two employees
///
/// `PairKey::new(a, b) == PairKey::new(b, a)`; the smaller id is always `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: EmployeeId,
    high: EmployeeId,
}

impl PairKey {
    pub fn new(a: EmployeeId, b: EmployeeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> EmployeeId {
        self.low
    }

    pub fn high(&self) -> EmployeeId {
        self.high
    }

    pub fn contains(&self, employee_id: EmployeeId) -> bool {
        self.low == employee_id || self.high == employee_id
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePairKeyError(String);

impl fmt::Display for ParsePairKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pair key '{}', expected '<id>,<id>'", self.0)
    }
}

impl std::error::Error for ParsePairKeyError {}

impl FromStr for PairKey {
    type Err = ParsePairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePairKeyError(s.to_string());
        let (a, b) = s.split_once(',').ok_or_else(err)?;
        let a = a.trim().parse().map_err(|_| err())?;
        let b = b.trim().parse().map_err(|_| err())?;
        Ok(PairKey::new(a, b))
    }
}

impl Serialize for PairKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PairKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Overlap of two assignments on one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverlap {
    pub emp_id1: EmployeeId,
    pub emp_id2: EmployeeId,
    pub project_id: ProjectId,
    pub days_worked: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Cumulative overlap of one employee pair across all shared projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairOverlap {
    pub pair: PairKey,
    pub total_days: i64,
    pub projects: Vec<ProjectOverlap>,
}

impl PairOverlap {
    pub fn new(pair: PairKey) -> Self {
        Self {
            pair,
            total_days: 0,
            projects: Vec::new(),
        }
    }

    /// Add one project-level overlap to the running total
    pub fn record(&mut self, overlap: ProjectOverlap) {
        self.total_days += overlap.days_worked;
        self.projects.push(overlap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(PairKey::new(102, 101), PairKey::new(101, 102));
        assert_eq!(PairKey::new(102, 101).to_string(), "101,102");
        assert_eq!(PairKey::new(9, 10).low(), 9);
    }

    #[test]
    fn test_pair_key_orders_numerically() {
        // "10,20" sorts before "9,30" as text but not as ids
        assert!(PairKey::new(9, 30) < PairKey::new(10, 20));
    }

    #[test]
    fn test_pair_key_from_str() {
        assert_eq!("5, 3".parse::<PairKey>().unwrap(), PairKey::new(3, 5));
        assert!("5".parse::<PairKey>().is_err());
        assert!("a,b".parse::<PairKey>().is_err());
    }

    #[test]
    fn test_pair_overlap_json_shape() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let mut result = PairOverlap::new(PairKey::new(102, 101));
        result.record(ProjectOverlap {
            emp_id1: 101,
            emp_id2: 102,
            project_id: 1,
            days_worked: 6,
            date_from: d(5),
            date_to: d(10),
        });

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pair": "101,102",
                "totalDays": 6,
                "projects": [{
                    "empId1": 101,
                    "empId2": 102,
                    "projectId": 1,
                    "daysWorked": 6,
                    "dateFrom": "2024-01-05",
                    "dateTo": "2024-01-10"
                }]
            })
        );

        let back: PairOverlap = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
