//! Persistence of evaluation results and batch records.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::ProbeError;
use crate::model::{EvaluationResult, file_stem, file_timestamp};
use crate::runner::BatchRecord;

/// Suffix of per-site result files.
pub const EVALUATION_SUFFIX: &str = "_evaluation.json";

/// Where evaluation results go.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist one site's result, replacing an earlier result for the same
    /// site.
    async fn save(&self, result: &EvaluationResult) -> Result<(), ProbeError>;

    /// Every stored result, ordered by site file name. Unreadable entries
    /// are skipped.
    async fn load_all(&self) -> Result<Vec<EvaluationResult>, ProbeError>;

    /// Persist the metadata of a finished batch.
    async fn save_batch(&self, record: &BatchRecord) -> Result<(), ProbeError>;
}

/// One JSON file per site in a results directory.
pub struct FileResultStore {
    directory: PathBuf,
}

impl FileResultStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<results>/<site>_evaluation.json`.
    pub fn result_path(&self, website: &str) -> PathBuf {
        self.directory
            .join(format!("{}{}", file_stem(website), EVALUATION_SUFFIX))
    }

    /// `<results>/batch_results_<ts>.json`.
    pub fn batch_path(&self, record: &BatchRecord) -> PathBuf {
        self.directory.join(format!(
            "batch_results_{}.json",
            file_timestamp(record.end_time)
        ))
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn save(&self, result: &EvaluationResult) -> Result<(), ProbeError> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let json = serde_json::to_string_pretty(result)?;
        let path = self.result_path(&result.website);
        tokio::fs::write(&path, json).await?;
        debug!("Saved result for {} to {:?}", result.website, path);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<EvaluationResult>, ProbeError> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        while let Some(entry) = entries.next_entry().await? {
            let is_result = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(EVALUATION_SUFFIX));
            if is_result {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            let parsed = match tokio::fs::read_to_string(&path).await {
                Ok(json) => serde_json::from_str::<EvaluationResult>(&json).map_err(ProbeError::from),
                Err(e) => Err(ProbeError::Io(e)),
            };
            match parsed {
                Ok(result) => results.push(result),
                Err(e) => warn!("Skipping unreadable result file {:?}: {}", path, e),
            }
        }
        Ok(results)
    }

    async fn save_batch(&self, record: &BatchRecord) -> Result<(), ProbeError> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let json = serde_json::to_string_pretty(record)?;
        let path = self.batch_path(record);
        tokio::fs::write(&path, json).await?;
        debug!("Saved batch record to {:?}", path);
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryResultStore {
    results: Mutex<Vec<EvaluationResult>>,
    batches: Mutex<Vec<BatchRecord>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<BatchRecord> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn save(&self, result: &EvaluationResult) -> Result<(), ProbeError> {
        let mut results = self.results.lock();
        let stem = file_stem(&result.website);
        results.retain(|r| file_stem(&r.website) != stem);
        results.push(result.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<EvaluationResult>, ProbeError> {
        let mut results = self.results.lock().clone();
        results.sort_by_key(|r| format!("{}{}", file_stem(&r.website), EVALUATION_SUFFIX));
        Ok(results)
    }

    async fn save_batch(&self, record: &BatchRecord) -> Result<(), ProbeError> {
        self.batches.lock().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
