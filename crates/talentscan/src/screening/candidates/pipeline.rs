//! Filtering and ordering for stored results.
//!
//! Criteria are conjunctive and each one is skipped entirely while it holds
//! its inactive value, so a default [`FilterCriteria`] passes every record
//! through untouched. The pipeline is pure and works on a snapshot; it never
//! touches the store.

use super::domain::{CandidateRecord, FunnelStatus};
use super::scoring::ScoringPolicy;

/// Narrows the result list. Text criteria match as case-insensitive
/// substrings; the empty string, `None` status, and a zero minimum all mean
/// "not filtering on this".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub position: String,
    pub status: Option<FunnelStatus>,
    pub min_score_percent: u8,
}

impl FilterCriteria {
    pub fn matches(&self, record: &CandidateRecord, policy: &ScoringPolicy) -> bool {
        self.matches_search(record)
            && self.matches_position(record)
            && self.matches_status(record, policy)
            && self.matches_min_score(record, policy)
    }

    /// Substring match over name, email, and predicted label. Missing
    /// contact fields simply cannot match.
    fn matches_search(&self, record: &CandidateRecord) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        [
            record.name.as_deref(),
            record.email.as_deref(),
            Some(record.predicted_label.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_position(&self, record: &CandidateRecord) -> bool {
        if self.position.is_empty() {
            return true;
        }
        record
            .predicted_label
            .to_lowercase()
            .contains(&self.position.to_lowercase())
    }

    fn matches_status(&self, record: &CandidateRecord, policy: &ScoringPolicy) -> bool {
        match self.status {
            None => true,
            Some(wanted) => policy.status_for(record.confidence) == wanted,
        }
    }

    /// Minimum is expressed in percent and compared against the adjusted
    /// score, boundary inclusive.
    fn matches_min_score(&self, record: &CandidateRecord, policy: &ScoringPolicy) -> bool {
        if self.min_score_percent == 0 {
            return true;
        }
        policy.adjusted_score(record.confidence) >= f64::from(self.min_score_percent) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Score,
    Name,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "score" => Some(Self::Score),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriteria {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortCriteria {
    fn default() -> Self {
        Self {
            field: SortField::Score,
            direction: SortDirection::Descending,
        }
    }
}

impl SortCriteria {
    /// Stable sort; descending reverses the comparison, not the output, so
    /// ties keep their store order either way.
    pub fn apply(&self, records: &mut [CandidateRecord], policy: &ScoringPolicy) {
        records.sort_by(|a, b| {
            let ordering = match self.field {
                SortField::Score => policy
                    .adjusted_score(a.confidence)
                    .total_cmp(&policy.adjusted_score(b.confidence)),
                SortField::Name => name_key(a).cmp(&name_key(b)),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

fn name_key(record: &CandidateRecord) -> String {
    record.name.as_deref().unwrap_or_default().to_lowercase()
}

/// Applies filters then ordering and returns the surviving records in their
/// response order.
pub fn view(
    records: &[CandidateRecord],
    filter: &FilterCriteria,
    sort: &SortCriteria,
    policy: &ScoringPolicy,
) -> Vec<CandidateRecord> {
    let mut rows: Vec<CandidateRecord> = records
        .iter()
        .filter(|record| filter.matches(record, policy))
        .cloned()
        .collect();
    sort.apply(&mut rows, policy);
    rows
}
