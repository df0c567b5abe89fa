//! Bridges a finished submission into the results view.

use super::domain::CandidateRecord;
use super::storage::{StorageAdapter, StorageError};
use super::store::ResultsStore;

/// Produced by a successful submission: `fresh` holds the records that
/// submission created, `results` the full merged list as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningHandoff {
    pub fresh: Vec<CandidateRecord>,
    pub results: Vec<CandidateRecord>,
}

/// Entry protocol for the results view. Arriving with a handoff installs its
/// carried list before anything is read, so fresh results win over stored
/// history; arriving without one falls back to whatever the storage holds.
pub fn enter_results_view<S: StorageAdapter>(
    store: &ResultsStore<S>,
    handoff: Option<ScreeningHandoff>,
) -> Result<Vec<CandidateRecord>, StorageError> {
    match handoff {
        Some(handoff) => store.replace_all(handoff.results),
        None => Ok(store.initialize()),
    }
}
