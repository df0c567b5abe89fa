//! Contract for the external resume classifier.
//!
//! The classifier is a black box: it receives batches of resume text and
//! returns one prediction per text, positionally aligned. Everything about
//! model choice, feature extraction, and scoring stays on its side of the
//! wire; this crate only derives funnel placement from the returned
//! confidence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod remote;

pub use remote::RemoteClassifier;

/// Usage example attached to classification error payloads so callers can
/// correct their request shape.
pub const EXPECTED_FORMAT: &str = "Send either: [{'text':'...'}] or {'text':'...'}";

/// One unit of resume text submitted for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Prediction returned by the classifier for a single text. Contact fields
/// are extracted by the classifier when present in the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub predicted_label: String,
    pub confidence: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Boundary trait so the submission flow can be exercised without a live
/// model service.
#[async_trait]
pub trait ResumeClassifier: Send + Sync {
    /// Classify a batch. The response must align index-for-index with the
    /// request.
    async fn classify(
        &self,
        requests: Vec<ClassifyRequest>,
    ) -> Result<Vec<Classification>, ClassifierError>;
}

/// Error enumeration for classification failures. None of these are
/// retried; resubmission is always user-initiated.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier unreachable: {0}")]
    Transport(String),
    #[error("classifier returned status {status}")]
    Upstream { status: u16, detail: Option<String> },
    #[error("classifier returned {received} predictions for {expected} texts")]
    MisalignedResponse { expected: usize, received: usize },
}

impl From<reqwest::Error> for ClassifierError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

impl ClassifierError {
    /// The single message surfaced to the submitting user: the upstream
    /// detail when the service provided one, otherwise a generic failure.
    pub fn user_message(&self) -> String {
        match self {
            ClassifierError::Upstream {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ClassifierError::Upstream { detail: None, .. } => "Classification failed".to_string(),
            ClassifierError::Transport(message) => message.clone(),
            ClassifierError::MisalignedResponse { .. } => self.to_string(),
        }
    }
}
