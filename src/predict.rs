//! Replicate prediction client and the budgeted polling driver.
//!
//! The service is asynchronous: creating a prediction returns a job handle
//! whose URL is polled until the job reports a terminal status. The driver
//! here replaces the original unbounded 2-second loop with an explicit
//! budget (interval, attempt cap, wall-clock timeout) so one stuck job can
//! never block the console forever.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{TanyaError, TanyaResult};

const DEFAULT_API_URL: &str = "https://api.replicate.com/v1/predictions";

const STATUS_SUCCEEDED: &str = "succeeded";
const STATUS_FAILED: &str = "failed";

/// Handle for a submitted prediction job: the URL to poll for its status.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub poll_url: String,
}

/// One status snapshot of a prediction job.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub status: String,
    /// Present once the job is terminal; may be a string or an ordered array
    /// of string fragments depending on the model version.
    #[serde(default)]
    pub output: Value,
}

impl Prediction {
    /// "succeeded" and "failed" end the poll loop; everything else
    /// ("starting", "processing", ...) means keep waiting.
    pub fn is_terminal(&self) -> bool {
        self.status == STATUS_SUCCEEDED || self.status == STATUS_FAILED
    }
}

/// Minimal prediction-service contract. The console loop only ever talks to
/// this trait, which keeps the pipeline testable without network access.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    /// Submit a prompt; returns the handle used to poll for completion.
    async fn create(&self, prompt: &str) -> TanyaResult<JobHandle>;

    /// Fetch the current status (and output, once terminal) of a job.
    async fn poll(&self, job: &JobHandle) -> TanyaResult<Prediction>;
}

/// Budget for the polling loop.
#[derive(Debug, Clone)]
pub struct PollBudget {
    /// Fixed delay between polls. No backoff, no jitter.
    pub interval: Duration,
    /// Hard cap on the number of status fetches.
    pub max_attempts: u32,
    /// Wall-clock ceiling for the whole wait.
    pub timeout: Duration,
}

impl Default for PollBudget {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_attempts: 60,
            timeout: Duration::from_secs(180),
        }
    }
}

/// Drive a job to a terminal status under the given budget and return its
/// output payload.
///
/// A "failed" status passes its output through exactly like a success; the
/// original client never told the two apart, and downstream classification
/// already rejects non-SQL text. The warning below is the only trace of the
/// failure.
pub async fn await_output(
    api: &dyn PredictionApi,
    job: &JobHandle,
    budget: &PollBudget,
) -> TanyaResult<Value> {
    let started = Instant::now();
    let mut attempts = 0u32;

    while attempts < budget.max_attempts && started.elapsed() < budget.timeout {
        tokio::time::sleep(budget.interval).await;
        attempts += 1;

        let prediction = api.poll(job).await?;
        debug!(attempts, status = %prediction.status, "polled prediction");

        if prediction.is_terminal() {
            if prediction.status == STATUS_FAILED {
                warn!("prediction reported status 'failed'; forwarding its output anyway");
            }
            return Ok(prediction.output);
        }
    }

    Err(TanyaError::PollBudget {
        attempts,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

/// Client for the Replicate predictions HTTP API.
pub struct ReplicateClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    model_version: String,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    urls: JobUrls,
}

#[derive(Debug, Deserialize)]
struct JobUrls {
    get: String,
}

impl ReplicateClient {
    pub fn new(token: impl Into<String>, model_version: impl Into<String>) -> Self {
        Self::with_api_url(DEFAULT_API_URL, token, model_version)
    }

    pub fn with_api_url(
        api_url: impl Into<String>,
        token: impl Into<String>,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            token: token.into(),
            model_version: model_version.into(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }
}

#[async_trait]
impl PredictionApi for ReplicateClient {
    async fn create(&self, prompt: &str) -> TanyaResult<JobHandle> {
        let body = json!({
            "version": self.model_version,
            "input": {
                "prompt": prompt,
                "max_tokens": 300,
                "temperature": 0.2,
            }
        });

        let response = self
            .http
            .post(&self.api_url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| TanyaError::Api(e.to_string()))?
            .error_for_status()
            .map_err(|e| TanyaError::Api(e.to_string()))?;

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| TanyaError::Api(e.to_string()))?;

        Ok(JobHandle {
            poll_url: created.urls.get,
        })
    }

    async fn poll(&self, job: &JobHandle) -> TanyaResult<Prediction> {
        let response = self
            .http
            .get(&job.poll_url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(|e| TanyaError::Api(e.to_string()))?
            .error_for_status()
            .map_err(|e| TanyaError::Api(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| TanyaError::Api(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        let pending = Prediction {
            status: "processing".to_string(),
            output: Value::Null,
        };
        assert!(!pending.is_terminal());

        let ok = Prediction {
            status: "succeeded".to_string(),
            output: Value::Null,
        };
        assert!(ok.is_terminal());

        let failed = Prediction {
            status: "failed".to_string(),
            output: Value::Null,
        };
        assert!(failed.is_terminal());
    }

    #[test]
    fn test_default_budget_keeps_original_interval() {
        let budget = PollBudget::default();
        assert_eq!(budget.interval, Duration::from_millis(2000));
    }

    #[test]
    fn test_poll_response_ignores_unknown_fields() {
        let raw = r#"{
            "id": "abc123",
            "status": "succeeded",
            "output": ["SELECT 1;"],
            "metrics": {"predict_time": 1.2}
        }"#;
        let prediction: Prediction = serde_json::from_str(raw).unwrap();
        assert_eq!(prediction.status, "succeeded");
        assert_eq!(prediction.output, json!(["SELECT 1;"]));
    }

    #[test]
    fn test_poll_response_without_output() {
        let raw = r#"{"status": "starting"}"#;
        let prediction: Prediction = serde_json::from_str(raw).unwrap();
        assert!(!prediction.is_terminal());
        assert_eq!(prediction.output, Value::Null);
    }
}
