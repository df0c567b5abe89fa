use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scoring::{self, ScoringPolicy};

/// Identifier wrapper for stored candidate results.
///
/// Ids are minted once at record creation and survive restarts alongside the
/// persisted list, so removal never has to rely on list positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single classified resume as returned by the scoring service.
///
/// `confidence` is stored raw and unvalidated; the adjusted score and funnel
/// status are always derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub predicted_label: String,
    pub confidence: f64,
    pub resume_text: String,
}

impl CandidateRecord {
    /// Funnel placement under the default scoring policy.
    pub fn status(&self) -> FunnelStatus {
        scoring::classify(self.confidence)
    }

    /// Response shape with the derived fields filled in.
    pub fn view(&self) -> CandidateView {
        CandidateView::from_record(self, &ScoringPolicy::default())
    }
}

/// Hire-funnel status derived from the adjusted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelStatus {
    Qualified,
    Reviewing,
    Rejected,
}

impl FunnelStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FunnelStatus::Qualified => "qualified",
            FunnelStatus::Reviewing => "reviewing",
            FunnelStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "qualified" => Some(Self::Qualified),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Sanitized representation of a record for API responses, with the adjusted
/// score and funnel status computed from the stored confidence.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: CandidateId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub predicted_label: String,
    pub confidence: f64,
    pub score: f64,
    pub score_percent: u16,
    pub status: &'static str,
}

impl CandidateView {
    pub fn from_record(record: &CandidateRecord, policy: &ScoringPolicy) -> Self {
        let score = policy.adjusted_score(record.confidence);
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            predicted_label: record.predicted_label.clone(),
            confidence: record.confidence,
            score,
            score_percent: (score * 100.0).round() as u16,
            status: policy.status_for(record.confidence).label(),
        }
    }
}
