//! Request/response bodies and error mapping for the HTTP API.

use crate::advice::Recommendation;
use crate::error::PredictionError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cardiorisk_ml::{Prediction, RiskLabel};
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub heart_disease_risk: RiskLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl PredictionResponse {
    pub fn from_prediction(prediction: &Prediction, include_confidence: bool) -> Self {
        Self {
            heart_disease_risk: prediction.label,
            confidence: if include_confidence {
                prediction.confidence()
            } else {
                None
            },
        }
    }
}

/// Body of a successful `POST /assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub prediction: PredictionResponse,
    pub recommendations: Vec<Recommendation>,
}

/// Model identity reported by `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub kind: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub uptime_secs: u64,
}

/// Body of `GET /schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub feature_count: usize,
    pub columns: Vec<String>,
}

/// JSON error body shared by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be read as a clinical record.
    MalformedInput(String),
    Prediction(PredictionError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        Self::Prediction(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Prediction(e) => prediction_status(e),
        }
    }
}

fn prediction_status(err: &PredictionError) -> StatusCode {
    match err {
        PredictionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PredictionError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PredictionError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        let status = prediction_status(&self);
        let body = ErrorBody {
            error: self.kind().to_string(),
            detail: self.to_string(),
            violations: match self {
                PredictionError::Validation(v) => v,
                _ => Vec::new(),
            },
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MalformedInput(detail) => {
                let body = ErrorBody {
                    error: "malformed_input".to_string(),
                    detail,
                    violations: Vec::new(),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            Self::Prediction(e) => e.into_response(),
        }
    }
}
