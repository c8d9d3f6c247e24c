//! Result type aliases

use crate::error::{PairError, ValidationError};

/// Standard Result type for Employee Pairs operations
pub type PairResult<T> = Result<T, PairError>;

/// Result of parsing or policy checks that can only fail on bad input
pub type ValidationResult<T> = Result<T, ValidationError>;
