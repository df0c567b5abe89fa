//! Candidate results management.
//!
//! Holds the ordered list of classification results for a screening session,
//! derives hire-funnel status from each raw confidence score, and provides
//! deterministic filtering, sorting, durable storage, and the HTTP surface
//! the dashboard consumes. Records are immutable once created; the list only
//! changes through append, removal, or a full clear, and every mutation
//! rewrites the persisted copy before it is acknowledged.

pub mod domain;
pub mod export;
pub mod handoff;
pub mod pipeline;
pub mod router;
pub mod scoring;
pub mod service;
pub mod storage;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{CandidateId, CandidateRecord, CandidateView, FunnelStatus};
pub use export::{csv_string, write_csv};
pub use handoff::{enter_results_view, ScreeningHandoff};
pub use pipeline::{view, FilterCriteria, SortCriteria, SortDirection, SortField};
pub use router::screening_router;
pub use scoring::{classify, ScoringPolicy, SCORE_MULTIPLIER};
pub use service::{ScreeningService, SubmissionError};
pub use storage::{JsonFileStorage, MemoryStorage, StorageAdapter, StorageError};
pub use store::{ResultsStore, StoreError};
