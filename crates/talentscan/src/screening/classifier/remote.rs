use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Classification, ClassifierError, ClassifyRequest, ResumeClassifier};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the resume scoring service.
///
/// Sends one JSON POST per submission batch with a bounded deadline and no
/// retry. Timeouts and connection failures surface as
/// [`ClassifierError::Transport`].
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Default for RemoteClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteClassifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn classify_url(&self) -> String {
        format!("{}/classify", self.base_url)
    }
}

/// Error payloads come back either FastAPI-style (`detail`) or proxy-style
/// (`error`); accept both.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail.or(parsed.error))
}

#[async_trait]
impl ResumeClassifier for RemoteClassifier {
    async fn classify(
        &self,
        requests: Vec<ClassifyRequest>,
    ) -> Result<Vec<Classification>, ClassifierError> {
        let expected = requests.len();
        debug!(batch = expected, "submitting resume batch for classification");

        let response = self
            .client
            .post(self.classify_url())
            .timeout(self.timeout)
            .json(&requests)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            warn!(status, "resume classifier rejected the batch");
            return Err(ClassifierError::Upstream { status, detail });
        }

        let predictions: Vec<Classification> = response.json().await?;

        if predictions.len() != expected {
            warn!(
                expected,
                received = predictions.len(),
                "classifier response misaligned with request"
            );
            return Err(ClassifierError::MisalignedResponse {
                expected,
                received: predictions.len(),
            });
        }

        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_url_appends_endpoint() {
        let classifier = RemoteClassifier::new();
        assert_eq!(classifier.classify_url(), "http://localhost:8000/classify");
    }

    #[test]
    fn builder_overrides_defaults() {
        let classifier = RemoteClassifier::new()
            .with_url("http://scoring.internal:9000")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(classifier.base_url, "http://scoring.internal:9000");
        assert_eq!(classifier.timeout, Duration::from_secs(3));
    }

    #[test]
    fn detail_extraction_accepts_both_keys() {
        assert_eq!(
            extract_detail(r#"{"detail":"model is loading"}"#),
            Some("model is loading".to_string())
        );
        assert_eq!(
            extract_detail(r#"{"error":"bad batch"}"#),
            Some("bad batch".to_string())
        );
        assert_eq!(extract_detail("<html>502</html>"), None);
    }
}
