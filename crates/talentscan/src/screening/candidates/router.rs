use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::screening::classifier::{ClassifierError, ResumeClassifier, EXPECTED_FORMAT};

use super::domain::{CandidateId, CandidateRecord, CandidateView, FunnelStatus};
use super::export;
use super::pipeline::{FilterCriteria, SortCriteria, SortDirection, SortField};
use super::service::{ScreeningService, SubmissionError};
use super::storage::StorageAdapter;
use super::store::StoreError;

/// Router builder exposing the screening endpoints over a shared service.
pub fn screening_router<S, C>(service: Arc<ScreeningService<S, C>>) -> Router
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    Router::new()
        .route("/api/classify", post(classify_handler::<S, C>))
        .route(
            "/api/results",
            get(results_handler::<S, C>).delete(clear_handler::<S, C>),
        )
        .route("/api/results/export", get(export_handler::<S, C>))
        .route("/api/results/:id", delete(remove_handler::<S, C>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct TextSubmission {
    text: String,
}

/// Request shapes accepted by `POST /api/classify`: a bare array of
/// `{"text"}` objects, a single such object, or `{"resumes": [...]}` with
/// raw strings. Anything else is rejected with the usage example.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyPayload {
    Batch(Vec<TextSubmission>),
    Single(TextSubmission),
    Wrapped { resumes: Vec<String> },
}

impl ClassifyPayload {
    fn into_texts(self) -> Vec<String> {
        match self {
            ClassifyPayload::Batch(items) => items.into_iter().map(|item| item.text).collect(),
            ClassifyPayload::Single(item) => vec![item.text],
            ClassifyPayload::Wrapped { resumes } => resumes,
        }
    }
}

/// Filter and sort parameters shared by the results and export endpoints.
/// Unrecognized status or sort tokens fall back to the defaults rather
/// than failing the request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResultsQuery {
    search: Option<String>,
    position: Option<String>,
    status: Option<String>,
    min_score: Option<u8>,
    sort_by: Option<String>,
    direction: Option<String>,
}

impl ResultsQuery {
    fn criteria(&self) -> (FilterCriteria, SortCriteria) {
        let filter = FilterCriteria {
            search_term: self.search.clone().unwrap_or_default(),
            position: self.position.clone().unwrap_or_default(),
            status: self.status.as_deref().and_then(FunnelStatus::parse),
            min_score_percent: self.min_score.unwrap_or_default(),
        };
        let defaults = SortCriteria::default();
        let sort = SortCriteria {
            field: self
                .sort_by
                .as_deref()
                .and_then(SortField::parse)
                .unwrap_or(defaults.field),
            direction: self
                .direction
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or(defaults.direction),
        };
        (filter, sort)
    }
}

pub(crate) async fn classify_handler<S, C>(
    State(service): State<Arc<ScreeningService<S, C>>>,
    payload: Result<Json<ClassifyPayload>, JsonRejection>,
) -> Response
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    let Ok(Json(payload)) = payload else {
        let body = json!({
            "error": "Invalid request format",
            "expected_format": EXPECTED_FORMAT,
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
    };

    match service.submit_batch(payload.into_texts()).await {
        Ok(handoff) => {
            let views = views_for(&handoff.fresh, &service);
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(SubmissionError::EmptyInput) => {
            let body = json!({ "error": SubmissionError::EmptyInput.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        Err(SubmissionError::Classifier(error)) => classifier_error_response(&error),
        Err(SubmissionError::Storage(error)) => {
            let body = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Upstream failures keep the upstream status; everything else on the
/// classifier path is a gateway problem. The body always carries the usage
/// example alongside the user-facing message.
fn classifier_error_response(error: &ClassifierError) -> Response {
    let status = match error {
        ClassifierError::Upstream { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ClassifierError::Transport(_) | ClassifierError::MisalignedResponse { .. } => {
            StatusCode::BAD_GATEWAY
        }
    };
    let body = json!({
        "error": error.user_message(),
        "expected_format": EXPECTED_FORMAT,
    });
    (status, Json(body)).into_response()
}

pub(crate) async fn results_handler<S, C>(
    State(service): State<Arc<ScreeningService<S, C>>>,
    Query(query): Query<ResultsQuery>,
) -> Response
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    let (filter, sort) = query.criteria();
    let records = service.results_view(&filter, &sort);
    (StatusCode::OK, Json(views_for(&records, &service))).into_response()
}

pub(crate) async fn clear_handler<S, C>(
    State(service): State<Arc<ScreeningService<S, C>>>,
) -> Response
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    match service.clear() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            let body = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub(crate) async fn remove_handler<S, C>(
    State(service): State<Arc<ScreeningService<S, C>>>,
    Path(id): Path<String>,
) -> Response
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    let id = CandidateId(id);
    match service.discard(&id) {
        Ok(remaining) => (StatusCode::OK, Json(views_for(&remaining, &service))).into_response(),
        Err(StoreError::UnknownCandidate(id)) => {
            let body = json!({ "error": format!("no stored result with id {id}") });
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
        Err(other) => {
            let body = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub(crate) async fn export_handler<S, C>(
    State(service): State<Arc<ScreeningService<S, C>>>,
    Query(query): Query<ResultsQuery>,
) -> Response
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    let (filter, sort) = query.criteria();
    let records = service.results_view(&filter, &sort);
    match export::csv_string(&records, service.policy()) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"candidates.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(error) => {
            let body = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn views_for<S, C>(
    records: &[CandidateRecord],
    service: &ScreeningService<S, C>,
) -> Vec<CandidateView>
where
    S: StorageAdapter + 'static,
    C: ResumeClassifier + 'static,
{
    records
        .iter()
        .map(|record| CandidateView::from_record(record, service.policy()))
        .collect()
}
