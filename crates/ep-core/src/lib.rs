//! # ep-core
//!
//! Core types shared by every Employee Pairs crate:
//! - Error kinds (validation, file processing, data not found)
//! - Result type alias
//! - Application configuration

pub mod config;
pub mod error;
pub mod result;

pub use error::*;
pub use result::*;
