use super::domain::FunnelStatus;

/// Boost applied on top of raw classifier confidence.
pub const SCORE_MULTIPLIER: f64 = 1.5;

const QUALIFIED_ABOVE: f64 = 0.7;
const REVIEWING_ABOVE: f64 = 0.4;

/// Converts raw classifier confidence into an adjusted score and a funnel
/// status. The adjusted score is deliberately left uncapped, so values above
/// 1.0 are possible and expected for high-confidence candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    pub multiplier: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            multiplier: SCORE_MULTIPLIER,
        }
    }
}

impl ScoringPolicy {
    pub fn adjusted_score(&self, confidence: f64) -> f64 {
        confidence * self.multiplier
    }

    /// Thresholds are strict: landing exactly on a boundary falls through to
    /// the lower bucket.
    pub fn status_for(&self, confidence: f64) -> FunnelStatus {
        let score = self.adjusted_score(confidence);
        if score > QUALIFIED_ABOVE {
            FunnelStatus::Qualified
        } else if score > REVIEWING_ABOVE {
            FunnelStatus::Reviewing
        } else {
            FunnelStatus::Rejected
        }
    }
}

/// Funnel status for a confidence value under the default policy.
pub fn classify(confidence: f64) -> FunnelStatus {
    ScoringPolicy::default().status_for(confidence)
}
