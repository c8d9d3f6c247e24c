//! # ep-analysis
//!
//! Finds the pair of employees who worked together the longest.
//!
//! Records are grouped by project, every pair of records inside a project is
//! compared once, and overlapping days are accumulated per employee pair.
//! Comparison cost is quadratic in the largest project roster, not in the
//! total number of records.

pub mod analyzer;
pub mod overlap;

pub use analyzer::OverlapAnalyzer;
pub use overlap::{overlap_window, OverlapWindow};
