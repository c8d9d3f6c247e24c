//! # ep-ingest
//!
//! Turns uploaded assignment files into validated [`AssignmentRecord`]s.
//!
//! - [`UploadPolicy`] rejects unusable uploads before any parsing happens
//! - [`DateFormats`] holds the accepted date layouts, tried in order
//! - [`RecordParser`] reads the file line by line and fails fast on the first
//!   malformed data row
//!
//! [`AssignmentRecord`]: ep_models::AssignmentRecord

pub mod dates;
pub mod parser;
pub mod policy;

pub use dates::{DateCell, DateFormat, DateFormats};
pub use parser::RecordParser;
pub use policy::{UploadPolicy, UploadedFile};
