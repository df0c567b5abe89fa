//! Durable backends for the results list.
//!
//! An adapter persists the whole list on every save; there is no incremental
//! write path. [`JsonFileStorage`] is the production backend,
//! [`MemoryStorage`] backs tests and the offline demo.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::domain::CandidateRecord;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("results file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("results file {} holds malformed JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed encoding results: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub trait StorageAdapter: Send + Sync {
    fn load(&self) -> Result<Vec<CandidateRecord>, StorageError>;
    fn save(&self, records: &[CandidateRecord]) -> Result<(), StorageError>;
}

/// Stores the record list as one pretty-printed JSON document. Saves write
/// a sibling temp file first and rename it into place, so a crash mid-write
/// leaves the previous list intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StorageAdapter for JsonFileStorage {
    /// A missing file is an empty history, not an error.
    fn load(&self) -> Result<Vec<CandidateRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, records: &[CandidateRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let payload = serde_json::to_vec_pretty(records).map_err(StorageError::Serialize)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, payload).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| self.io_error(source))?;
        Ok(())
    }
}

/// In-memory adapter. Clones share one backing list, so a test can hand a
/// clone to the store and inspect what was persisted afterwards.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self) -> Result<Vec<CandidateRecord>, StorageError> {
        Ok(self
            .records
            .lock()
            .expect("memory storage mutex poisoned")
            .clone())
    }

    fn save(&self, records: &[CandidateRecord]) -> Result<(), StorageError> {
        *self
            .records
            .lock()
            .expect("memory storage mutex poisoned") = records.to_vec();
        Ok(())
    }
}
