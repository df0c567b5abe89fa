use std::sync::Arc;

use crate::screening::classifier::{ClassifierError, ClassifyRequest, ResumeClassifier};

use super::domain::{CandidateId, CandidateRecord};
use super::handoff::ScreeningHandoff;
use super::pipeline::{self, FilterCriteria, SortCriteria};
use super::scoring::ScoringPolicy;
use super::storage::{StorageAdapter, StorageError};
use super::store::{ResultsStore, StoreError};

/// Service composing the results store and the upstream classifier.
pub struct ScreeningService<S, C> {
    store: Arc<ResultsStore<S>>,
    classifier: Arc<C>,
    policy: ScoringPolicy,
}

impl<S, C> ScreeningService<S, C>
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    pub fn new(store: Arc<ResultsStore<S>>, classifier: Arc<C>) -> Self {
        Self::with_policy(store, classifier, ScoringPolicy::default())
    }

    pub fn with_policy(
        store: Arc<ResultsStore<S>>,
        classifier: Arc<C>,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            store,
            classifier,
            policy,
        }
    }

    pub fn store(&self) -> &ResultsStore<S> {
        &self.store
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Submit one resume text for classification.
    pub async fn submit(&self, text: &str) -> Result<ScreeningHandoff, SubmissionError> {
        self.submit_batch(vec![text.to_string()]).await
    }

    /// Submit a batch of resume texts as one positionally-aligned upstream
    /// call. A blank text anywhere in the batch rejects the whole batch
    /// before any network traffic; a failed classification stores nothing.
    pub async fn submit_batch(
        &self,
        texts: Vec<String>,
    ) -> Result<ScreeningHandoff, SubmissionError> {
        if texts.is_empty() || texts.iter().any(|text| text.trim().is_empty()) {
            return Err(SubmissionError::EmptyInput);
        }

        let requests: Vec<ClassifyRequest> = texts
            .iter()
            .map(|text| ClassifyRequest { text: text.clone() })
            .collect();
        let classifications = self.classifier.classify(requests).await?;

        let fresh: Vec<CandidateRecord> = classifications
            .into_iter()
            .zip(texts)
            .map(|(classification, resume_text)| CandidateRecord {
                id: CandidateId::generate(),
                name: classification.name,
                email: classification.email,
                phone: classification.phone,
                predicted_label: classification.predicted_label,
                confidence: classification.confidence,
                resume_text,
            })
            .collect();

        let results = self.store.append(fresh.clone())?;
        Ok(ScreeningHandoff { fresh, results })
    }

    /// Current results under the given criteria, ready for presentation.
    pub fn results_view(
        &self,
        filter: &FilterCriteria,
        sort: &SortCriteria,
    ) -> Vec<CandidateRecord> {
        pipeline::view(&self.store.snapshot(), filter, sort, &self.policy)
    }

    pub fn discard(&self, id: &CandidateId) -> Result<Vec<CandidateRecord>, StoreError> {
        self.store.remove_by_id(id)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.clear_all()
    }
}

/// Error raised by the submission flow.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("no resume text was provided")]
    EmptyInput,
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
