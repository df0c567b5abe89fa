use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::screening::candidates::domain::{CandidateId, CandidateRecord};
use crate::screening::candidates::service::ScreeningService;
use crate::screening::candidates::storage::{MemoryStorage, StorageAdapter, StorageError};
use crate::screening::candidates::store::ResultsStore;
use crate::screening::classifier::{
    Classification, ClassifierError, ClassifyRequest, ResumeClassifier,
};

pub(super) fn record(name: &str, label: &str, confidence: f64) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId::generate(),
        name: Some(name.to_string()),
        email: Some(format!(
            "{}@example.com",
            name.to_lowercase().replace(' ', ".")
        )),
        phone: None,
        predicted_label: label.to_string(),
        confidence,
        resume_text: format!("{name} resume"),
    }
}

pub(super) fn anonymous_record(label: &str, confidence: f64) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId::generate(),
        name: None,
        email: None,
        phone: None,
        predicted_label: label.to_string(),
        confidence,
        resume_text: "unnamed resume".to_string(),
    }
}

pub(super) fn classification(label: &str, confidence: f64) -> Classification {
    Classification {
        predicted_label: label.to_string(),
        confidence,
        name: None,
        email: None,
        phone: None,
    }
}

pub(super) fn named_classification(name: &str, label: &str, confidence: f64) -> Classification {
    Classification {
        predicted_label: label.to_string(),
        confidence,
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: Some("515-555-0100".to_string()),
    }
}

/// Replays pre-scripted prediction batches in order and records every
/// request it sees. Clones share state. Running out of batches surfaces as
/// a transport error so a test cannot silently over-submit.
#[derive(Default, Clone)]
pub(super) struct ScriptedClassifier {
    batches: Arc<Mutex<VecDeque<Vec<Classification>>>>,
    requests: Arc<Mutex<Vec<Vec<ClassifyRequest>>>>,
}

impl ScriptedClassifier {
    pub(super) fn with_batch(batch: Vec<Classification>) -> Self {
        Self::with_batches(vec![batch])
    }

    pub(super) fn with_batches(batches: Vec<Vec<Classification>>) -> Self {
        Self {
            batches: Arc::new(Mutex::new(batches.into())),
            requests: Arc::default(),
        }
    }

    pub(super) fn seen_requests(&self) -> Vec<Vec<ClassifyRequest>> {
        self.requests
            .lock()
            .expect("classifier mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ResumeClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        requests: Vec<ClassifyRequest>,
    ) -> Result<Vec<Classification>, ClassifierError> {
        self.requests
            .lock()
            .expect("classifier mutex poisoned")
            .push(requests);
        self.batches
            .lock()
            .expect("classifier mutex poisoned")
            .pop_front()
            .ok_or_else(|| ClassifierError::Transport("no scripted batch left".to_string()))
    }
}

pub(super) struct UnreachableClassifier;

#[async_trait]
impl ResumeClassifier for UnreachableClassifier {
    async fn classify(
        &self,
        _requests: Vec<ClassifyRequest>,
    ) -> Result<Vec<Classification>, ClassifierError> {
        Err(ClassifierError::Transport("connection refused".to_string()))
    }
}

pub(super) struct OverloadedClassifier;

#[async_trait]
impl ResumeClassifier for OverloadedClassifier {
    async fn classify(
        &self,
        _requests: Vec<ClassifyRequest>,
    ) -> Result<Vec<Classification>, ClassifierError> {
        Err(ClassifierError::Upstream {
            status: 503,
            detail: Some("model is still loading".to_string()),
        })
    }
}

pub(super) struct FailingStorage;

impl StorageAdapter for FailingStorage {
    fn load(&self) -> Result<Vec<CandidateRecord>, StorageError> {
        Ok(Vec::new())
    }

    fn save(&self, _records: &[CandidateRecord]) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: PathBuf::from("results.json"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        })
    }
}

pub(super) struct MalformedStorage;

impl StorageAdapter for MalformedStorage {
    fn load(&self) -> Result<Vec<CandidateRecord>, StorageError> {
        let source = serde_json::from_str::<Vec<CandidateRecord>>("{ not json").unwrap_err();
        Err(StorageError::Malformed {
            path: PathBuf::from("results.json"),
            source,
        })
    }

    fn save(&self, _records: &[CandidateRecord]) -> Result<(), StorageError> {
        Ok(())
    }
}

pub(super) fn build_service(
    classifier: ScriptedClassifier,
) -> (
    Arc<ScreeningService<MemoryStorage, ScriptedClassifier>>,
    MemoryStorage,
) {
    let storage = MemoryStorage::new();
    let store = Arc::new(ResultsStore::new(storage.clone()));
    let service = Arc::new(ScreeningService::new(store, Arc::new(classifier)));
    (service, storage)
}

pub(super) fn temp_results_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("talentscan-{tag}-{}.json", uuid::Uuid::new_v4()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}
