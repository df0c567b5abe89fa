use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talentscan::screening::classifier::{
    Classification, ClassifierError, ClassifyRequest, ResumeClassifier,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Deterministic stand-in for the remote scoring model, used by the offline
/// demo. Confidence scales with keyword density so the demo output spans the
/// whole hiring funnel; texts with no recognized keywords land on the generic
/// label at the floor confidence.
#[derive(Debug, Default, Clone)]
pub(crate) struct KeywordClassifier;

const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Software Engineer",
        &[
            "rust",
            "python",
            "software",
            "backend",
            "api",
            "distributed",
            "testing",
            "cloud",
        ],
    ),
    (
        "Data Scientist",
        &["data", "statistics", "model", "pandas", "regression", "analytics"],
    ),
    (
        "Project Manager",
        &["project", "stakeholder", "roadmap", "agile", "budget", "delivery"],
    ),
    (
        "Sales Associate",
        &["sales", "quota", "pipeline", "crm", "negotiation"],
    ),
];

const FLOOR_CONFIDENCE: f64 = 0.22;
const PER_KEYWORD_LIFT: f64 = 0.11;
const CONFIDENCE_CAP: f64 = 0.97;

fn score_resume(text: &str) -> Classification {
    let haystack = text.to_lowercase();

    let mut best: (&str, usize) = ("General Applicant", 0);
    for (label, keywords) in ROLE_KEYWORDS {
        let hits = keywords
            .iter()
            .filter(|keyword| haystack.contains(*keyword))
            .count();
        if hits > best.1 {
            best = (label, hits);
        }
    }

    let confidence = (FLOOR_CONFIDENCE + PER_KEYWORD_LIFT * best.1 as f64).min(CONFIDENCE_CAP);

    Classification {
        predicted_label: best.0.to_string(),
        confidence,
        name: detect_name(text),
        email: detect_email(text),
        phone: detect_phone(text),
    }
}

/// Treats a short, address-free first line as the candidate's name, the way
/// most pasted resumes start.
fn detect_name(text: &str) -> Option<String> {
    let first = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    if first.len() <= 48 && !first.contains('@') && first.chars().any(char::is_alphabetic) {
        Some(first.to_string())
    } else {
        None
    }
}

fn detect_email(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|token| token.contains('@'))
        .map(|token| {
            token
                .trim_matches(|c: char| matches!(c, '(' | ')' | '<' | '>' | ',' | ';' | ':'))
                .to_string()
        })
}

fn detect_phone(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|token| {
            let digits = token.chars().filter(char::is_ascii_digit).count();
            digits >= 7
                && token
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '(' | ')' | '.'))
        })
        .map(str::to_string)
}

#[async_trait]
impl ResumeClassifier for KeywordClassifier {
    async fn classify(
        &self,
        requests: Vec<ClassifyRequest>,
    ) -> Result<Vec<Classification>, ClassifierError> {
        Ok(requests
            .iter()
            .map(|request| score_resume(&request.text))
            .collect())
    }
}
