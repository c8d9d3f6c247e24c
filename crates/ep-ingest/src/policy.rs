//! Upload policy
//!
//! Checks an uploaded file before any parsing happens: it must exist, be
//! non-empty, carry the expected extension and fit under the size ceiling.

use bytes::Bytes;
use ep_core::config::UploadConfig;
use ep_core::{ValidationError, ValidationResult};

/// An uploaded file as received from the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name supplied by the client
    pub filename: Option<String>,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: Some(filename.into()),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// File name for logs and responses
    pub fn display_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("unknown")
    }
}

/// Pre-parse acceptance rules for uploads
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Maximum file size in bytes
    pub max_file_size: u64,
    /// Required extension without the dot, compared case-insensitively
    pub allowed_extension: String,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
            allowed_extension: "csv".to_string(),
        }
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            allowed_extension: config.allowed_extension.clone(),
        }
    }
}

impl UploadPolicy {
    /// Check an upload; `None` means the request carried no file at all
    pub fn check<'a>(&self, file: Option<&'a UploadedFile>) -> ValidationResult<&'a UploadedFile> {
        let file = file.ok_or(ValidationError::MissingFile)?;

        if file.is_empty() {
            return Err(ValidationError::EmptyFile);
        }

        if !self.has_allowed_extension(file.filename.as_deref()) {
            return Err(ValidationError::UnsupportedFileType {
                extension: self.allowed_extension.to_uppercase(),
            });
        }

        if file.size() > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max: self.max_file_size,
            });
        }

        Ok(file)
    }

    fn has_allowed_extension(&self, filename: Option<&str>) -> bool {
        let Some(name) = filename.map(str::trim).filter(|n| !n.is_empty()) else {
            return false;
        };
        let suffix = format!(".{}", self.allowed_extension.to_lowercase());
        name.to_lowercase().ends_with(&suffix)
    }
}
