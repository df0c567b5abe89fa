//! CSV rendering of a results view, one row per record.

use std::io::Write;

use serde::Serialize;

use super::domain::CandidateRecord;
use super::scoring::ScoringPolicy;

const HEADERS: [&str; 7] = [
    "name",
    "email",
    "phone",
    "position",
    "confidence",
    "score",
    "status",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    position: &'a str,
    confidence: f64,
    score: String,
    status: &'static str,
}

impl<'a> ExportRow<'a> {
    fn from_record(record: &'a CandidateRecord, policy: &ScoringPolicy) -> Self {
        Self {
            name: record.name.as_deref().unwrap_or_default(),
            email: record.email.as_deref().unwrap_or_default(),
            phone: record.phone.as_deref().unwrap_or_default(),
            position: &record.predicted_label,
            confidence: record.confidence,
            score: format!("{:.2}", policy.adjusted_score(record.confidence)),
            status: policy.status_for(record.confidence).label(),
        }
    }
}

/// Writes the header plus one row per record, keeping the slice order.
/// Absent contact fields become empty cells.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[CandidateRecord],
    policy: &ScoringPolicy,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADERS)?;
    for record in records {
        csv_writer.serialize(ExportRow::from_record(record, policy))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn csv_string(
    records: &[CandidateRecord],
    policy: &ScoringPolicy,
) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records, policy)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
