//! Core error types for Employee Pairs
//!
//! Three recoverable kinds reach the request boundary: validation failures,
//! file-processing failures and missing data.

use thiserror::Error;

/// Core error type for all Employee Pairs operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    FileProcessing { message: String },

    #[error(transparent)]
    DataNotFound(#[from] NotFoundError),
}

/// Malformed input data, either for the whole upload or for a single line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File cannot be null")]
    MissingFile,

    #[error("File cannot be empty")]
    EmptyFile,

    #[error("File must be a {extension} file")]
    UnsupportedFileType { extension: String },

    #[error("File size cannot exceed {}", human_size(.max))]
    FileTooLarge { size: u64, max: u64 },

    #[error("Line {line}: Invalid {field} '{value}'")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: Unable to parse date '{value}'")]
    InvalidDate { line: usize, value: String },

    #[error("Line {line}: Start date is required")]
    MissingStartDate { line: usize },

    #[error("Line {line}: Start date cannot be after end date")]
    StartAfterEnd { line: usize },

    #[error("No valid employee records found in the CSV file")]
    NoRecords,
}

impl ValidationError {
    /// 1-based line number of the offending input, if the error is line-scoped
    pub fn line(&self) -> Option<usize> {
        match self {
            ValidationError::InvalidInteger { line, .. }
            | ValidationError::InvalidDate { line, .. }
            | ValidationError::MissingStartDate { line }
            | ValidationError::StartAfterEnd { line } => Some(*line),
            _ => None,
        }
    }
}

/// Analysis was requested but there is nothing to report
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("No employee data found. Please upload a CSV file first.")]
    NoRecords,

    #[error("No employee pairs found that worked together on the same projects.")]
    NoPairs,
}

fn human_size(bytes: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    let bytes = *bytes;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl PairError {
    pub fn file_processing(message: impl Into<String>) -> Self {
        PairError::FileProcessing {
            message: message.into(),
        }
    }

    /// HTTP status code the hosting layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            PairError::Validation(ValidationError::FileTooLarge { .. }) => 413,
            PairError::Validation(_) => 400,
            PairError::FileProcessing { .. } => 400,
            PairError::DataNotFound(_) => 404,
        }
    }

    /// Short human-readable title for error bodies
    pub fn error_title(&self) -> &'static str {
        match self {
            PairError::Validation(ValidationError::FileTooLarge { .. }) => "File Size Exceeded",
            PairError::Validation(_) => "Validation Error",
            PairError::FileProcessing { .. } => "File Processing Error",
            PairError::DataNotFound(_) => "Data Not Found",
        }
    }
}
