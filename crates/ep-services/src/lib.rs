//! # ep-services
//!
//! Business logic for Employee Pairs: accepting an uploaded assignment file
//! and analyzing the stored batch.

pub mod employee_pairs;

pub use employee_pairs::{EmployeePairService, StorageStatus, UploadSummary};
