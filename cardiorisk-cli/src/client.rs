//! HTTP client for a running prediction gateway.

use anyhow::Context;
use cardiorisk_core::gateway::{AssessmentResponse, ErrorBody, PredictionResponse};
use cardiorisk_ml::{ClinicalRecord, Prediction, RiskLabel};
use serde::de::DeserializeOwned;
use std::path::Path;

pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn predict(&self, record: &ClinicalRecord) -> anyhow::Result<PredictionResponse> {
        self.post("predict", record).await
    }

    pub async fn assess(&self, record: &ClinicalRecord) -> anyhow::Result<AssessmentResponse> {
        self.post("assess", record).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        record: &ClinicalRecord,
    ) -> anyhow::Result<T> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "Sending clinical record");
        let resp = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .with_context(|| format!("Could not reach prediction service at {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Prediction service returned {}: {}", status, describe_error(&text));
        }
        resp.json::<T>()
            .await
            .with_context(|| format!("Unexpected response body from {}", url))
    }
}

/// Human-readable summary of an error response body.
fn describe_error(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) if err.violations.is_empty() => err.detail,
        Ok(err) => format!("{}\n  - {}", err.detail, err.violations.join("\n  - ")),
        Err(_) => body.to_string(),
    }
}

/// Read one clinical record from a JSON file.
pub fn read_record(path: &Path) -> anyhow::Result<ClinicalRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid clinical record", path.display()))
}

/// Rebuild a prediction from the wire response.
///
/// The wire carries the confidence in the returned label; the probability of
/// the positive class is recovered from it.
pub fn prediction_from_response(resp: &PredictionResponse) -> Prediction {
    let label = resp.heart_disease_risk;
    let probability = resp.confidence.map(|c| match label {
        RiskLabel::High => c,
        RiskLabel::Low => 1.0 - c,
    });
    Prediction { label, probability }
}
