//! Employee pair service
//!
//! Orchestrates upload validation, parsing, batch replacement and analysis.

use std::sync::Arc;

use ep_analysis::OverlapAnalyzer;
use ep_core::{PairError, PairResult};
use ep_db::{AssignmentStore, RepositoryError};
use ep_ingest::{RecordParser, UploadPolicy, UploadedFile};
use ep_models::PairOverlap;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Response to a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub message: String,
    pub filename: String,
    /// Number of records now stored
    pub records: usize,
}

/// Storage readiness, as reported by health checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStatus {
    pub backend: &'static str,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<i64>,
}

/// Employee pair service
pub struct EmployeePairService {
    store: Arc<dyn AssignmentStore>,
    policy: UploadPolicy,
    analyzer: OverlapAnalyzer,
}

impl EmployeePairService {
    pub fn new(store: Arc<dyn AssignmentStore>, policy: UploadPolicy) -> Self {
        Self {
            store,
            policy,
            analyzer: OverlapAnalyzer::new(),
        }
    }

    /// Validate, parse and store an uploaded file, replacing the previous batch.
    ///
    /// Nothing is stored unless the whole file parses.
    #[instrument(skip(self, file), fields(filename = tracing::field::Empty))]
    pub async fn upload(&self, file: Option<UploadedFile>) -> PairResult<UploadSummary> {
        let filename = file
            .as_ref()
            .map(|f| f.display_name().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::Span::current().record("filename", filename.as_str());

        let file = self.policy.check(file.as_ref()).map_err(|e| {
            warn!(error = %e, "Upload rejected");
            PairError::from(e)
        })?;

        // A fresh parser per upload so open end dates resolve against today
        let parser = RecordParser::default();
        let records = match parser.parse_bytes(&file.content) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Assignment file rejected");
                return Err(e);
            }
        };

        self.store
            .replace_all(&records)
            .await
            .map_err(|e| persistence_error(&e))?;

        info!(
            records = records.len(),
            backend = self.store.backend(),
            "Stored assignment batch"
        );

        Ok(UploadSummary {
            message: "File uploaded and processed successfully".to_string(),
            filename,
            records: records.len(),
        })
    }

    /// Analyze the stored batch for the longest-working pair
    #[instrument(skip(self))]
    pub async fn longest_pair(&self) -> PairResult<PairOverlap> {
        let records = self.store.find_all_ordered().await.map_err(|e| {
            error!(error = %e, "Failed to load stored assignments");
            PairError::file_processing(format!("Failed to load employee data: {}", e))
        })?;

        let result = self.analyzer.longest_pair(&records)?;
        info!(
            pair = %result.pair,
            total_days = result.total_days,
            projects = result.projects.len(),
            "Longest working pair found"
        );
        Ok(result)
    }

    /// Reachability and size of the backing store
    pub async fn storage_status(&self) -> StorageStatus {
        let backend = self.store.backend();
        if let Err(e) = self.store.ping().await {
            warn!(backend, error = %e, "Storage ping failed");
            return StorageStatus {
                backend,
                reachable: false,
                records: None,
            };
        }

        StorageStatus {
            backend,
            reachable: true,
            records: self.store.count().await.ok(),
        }
    }
}

fn persistence_error(e: &RepositoryError) -> PairError {
    error!(error = %e, "Failed to persist assignment batch");
    PairError::file_processing(format!("Failed to save employee data: {}", e))
}
