//! The owned results list and its persistence discipline.
//!
//! Every mutation builds the successor list, persists it through the
//! adapter, and only then commits it to memory. A failed save therefore
//! leaves both the in-memory list and the stored one at the previous state.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::warn;

use super::domain::{CandidateId, CandidateRecord};
use super::storage::{StorageAdapter, StorageError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no stored result with id {0}")]
    UnknownCandidate(CandidateId),
    #[error("result index {index} is out of range for {len} stored results")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Single source of truth for classified candidates. The mutex makes each
/// mutation-plus-save atomic with respect to concurrent callers.
pub struct ResultsStore<S> {
    storage: S,
    records: Mutex<Vec<CandidateRecord>>,
}

impl<S: StorageAdapter> ResultsStore<S> {
    /// Starts empty; call [`initialize`](Self::initialize) to pick up
    /// persisted history.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Loads persisted history into memory and returns it. A missing,
    /// unreadable, or malformed history is downgraded to an empty list with
    /// a warning; initialization itself never fails.
    pub fn initialize(&self) -> Vec<CandidateRecord> {
        let loaded = match self.storage.load() {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "discarding unreadable results history");
                Vec::new()
            }
        };
        let mut records = self.lock();
        *records = loaded;
        records.clone()
    }

    pub fn snapshot(&self) -> Vec<CandidateRecord> {
        self.lock().clone()
    }

    /// Appends a batch after the existing records and returns the merged
    /// list. Appending two batches one after the other leaves the same state
    /// as appending their concatenation.
    pub fn append(
        &self,
        fresh: Vec<CandidateRecord>,
    ) -> Result<Vec<CandidateRecord>, StorageError> {
        let mut records = self.lock();
        let mut merged = records.clone();
        merged.extend(fresh);
        self.storage.save(&merged)?;
        *records = merged;
        Ok(records.clone())
    }

    /// Installs a full list as the current state, displacing whatever was
    /// held before.
    pub fn replace_all(
        &self,
        list: Vec<CandidateRecord>,
    ) -> Result<Vec<CandidateRecord>, StorageError> {
        let mut records = self.lock();
        self.storage.save(&list)?;
        *records = list;
        Ok(records.clone())
    }

    pub fn clear_all(&self) -> Result<(), StorageError> {
        let mut records = self.lock();
        self.storage.save(&[])?;
        records.clear();
        Ok(())
    }

    /// Removes the record carrying `id`. An unknown id is reported without
    /// touching state.
    pub fn remove_by_id(&self, id: &CandidateId) -> Result<Vec<CandidateRecord>, StoreError> {
        let mut records = self.lock();
        let index = records
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| StoreError::UnknownCandidate(id.clone()))?;
        let mut remaining = records.clone();
        remaining.remove(index);
        self.storage.save(&remaining)?;
        *records = remaining;
        Ok(records.clone())
    }

    /// Removes by list position. Out-of-range indexes are reported rather
    /// than ignored, since a stale index usually means the caller's view of
    /// the list has drifted.
    pub fn remove_at(&self, index: usize) -> Result<Vec<CandidateRecord>, StoreError> {
        let mut records = self.lock();
        if index >= records.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: records.len(),
            });
        }
        let mut remaining = records.clone();
        remaining.remove(index);
        self.storage.save(&remaining)?;
        *records = remaining;
        Ok(records.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CandidateRecord>> {
        self.records.lock().expect("results store mutex poisoned")
    }
}
