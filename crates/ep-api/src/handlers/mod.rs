//! API handlers

pub mod employees;
