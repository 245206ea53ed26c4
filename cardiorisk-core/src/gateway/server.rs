//! HTTP prediction gateway built on axum.

use super::GatewayConfig;
use super::api::{
    ApiError, AssessmentResponse, HealthResponse, ModelInfo, PredictionResponse, SchemaResponse,
};
use super::predictor::{ModelHandle, Predictor};
use crate::advice::recommendations;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use cardiorisk_ml::features::schema_names;
use cardiorisk_ml::{ClinicalRecord, FEATURE_COUNT};
use chrono::Utc;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared gateway reference for axum handlers.
///
/// Nothing on the request path mutates the server, so no lock is needed.
pub type SharedGateway = Arc<GatewayServer>;

/// The prediction gateway.
#[derive(Debug)]
pub struct GatewayServer {
    config: GatewayConfig,
    predictor: Predictor,
    started_at: chrono::DateTime<Utc>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, predictor: Predictor) -> Self {
        Self {
            config,
            predictor,
            started_at: Utc::now(),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn uptime_secs(&self) -> u64 {
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_seconds().max(0) as u64
    }

    fn respond(&self, record: &ClinicalRecord) -> Result<PredictionResponse, ApiError> {
        let prediction = self.predictor.predict(record)?;
        Ok(PredictionResponse::from_prediction(
            &prediction,
            self.config.include_confidence,
        ))
    }
}

/// Build the axum Router with every gateway route.
pub fn router(shared: SharedGateway) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/schema", get(schema_handler))
        .route("/predict", post(predict_handler))
        .route("/assess", post(assess_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Liveness probe.
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Heart Disease Prediction API is running",
    }))
}

/// Readiness probe: 503 until a model is loaded.
async fn health_handler(State(gw): State<SharedGateway>) -> impl IntoResponse {
    let uptime_secs = gw.uptime_secs();
    match gw.predictor().model() {
        ModelHandle::Ready(classifier) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".into(),
                model: Some(ModelInfo {
                    name: classifier.name().to_string(),
                    version: classifier.version().to_string(),
                    kind: classifier.kind().to_string(),
                }),
                reason: None,
                uptime_secs,
            }),
        ),
        ModelHandle::Unavailable { reason } => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable".into(),
                model: None,
                reason: Some(reason.clone()),
                uptime_secs,
            }),
        ),
    }
}

async fn schema_handler() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        feature_count: FEATURE_COUNT,
        columns: schema_names().iter().map(|s| s.to_string()).collect(),
    })
}

async fn predict_handler(
    State(gw): State<SharedGateway>,
    payload: Result<Json<ClinicalRecord>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(record) = payload?;
    gw.respond(&record).map(Json)
}

async fn assess_handler(
    State(gw): State<SharedGateway>,
    payload: Result<Json<ClinicalRecord>, JsonRejection>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let Json(record) = payload?;
    let prediction = gw.respond(&record)?;
    let recommendations = recommendations(&record, prediction.heart_disease_risk);
    Ok(Json(AssessmentResponse {
        prediction,
        recommendations,
    }))
}

/// Start the gateway on the configured address.
///
/// Runs until Ctrl-C, then drains in-flight requests.
pub async fn run(gw: SharedGateway) -> Result<(), std::io::Error> {
    let addr = gw.config().bind_addr();
    let app = router(gw);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "Prediction gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Prediction gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
