//! # cardiorisk-core
//!
//! Service layer around the heart-disease classifier: layered configuration,
//! the prediction gateway, health recommendations and assessment reports.

pub mod advice;
pub mod config;
pub mod error;
pub mod gateway;
pub mod report;

pub use advice::{Recommendation, recommendations};
pub use config::{CardioConfig, load_config};
pub use error::{CardioError, ConfigError, PredictionError, Result};
pub use gateway::{
    GatewayConfig, GatewayServer, ModelHandle, Predictor, SharedGateway, gateway_router,
    run_gateway,
};
pub use report::AssessmentReport;
