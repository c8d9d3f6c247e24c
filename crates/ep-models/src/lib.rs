//! # ep-models
//!
//! Domain models for Employee Pairs: the stored assignment record and the
//! derived analysis result types.

pub mod assignment;
pub mod pair;

/// Employee identifier as it appears in uploads
pub type EmployeeId = i32;

/// Project identifier as it appears in uploads
pub type ProjectId = i32;

pub use assignment::AssignmentRecord;
pub use pair::{PairKey, PairOverlap, ProjectOverlap};
