//! # HTTP Gateway
//!
//! Serves the prediction API over HTTP with axum. The classifier is loaded once
//! at startup and injected into the router through an immutable [`Predictor`];
//! handlers share it read-only and keep no per-request state.

mod api;
mod predictor;
mod server;

pub use api::{
    ApiError, AssessmentResponse, ErrorBody, HealthResponse, ModelInfo, PredictionResponse,
    SchemaResponse,
};
pub use predictor::{ModelHandle, Predictor};
pub use server::{GatewayServer, SharedGateway, router as gateway_router, run as run_gateway};

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Include the model's confidence in prediction responses.
    #[serde(default = "default_true")]
    pub include_confidence: bool,
    /// Start serving even if the model fails to load (every prediction then returns 503).
    #[serde(default)]
    pub allow_degraded_start: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            include_confidence: true,
            allow_degraded_start: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

impl GatewayConfig {
    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_config_default() {
        let config = GatewayConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.include_confidence);
        assert!(!config.allow_degraded_start);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_gateway_config_serialization() {
        let config = GatewayConfig {
            host: "0.0.0.0".into(),
            port: 9090,
            include_confidence: false,
            allow_degraded_start: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: GatewayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.port, 9090);
        assert!(!restored.include_confidence);
        assert!(restored.allow_degraded_start);
    }

    #[test]
    fn test_gateway_config_partial_json() {
        let restored: GatewayConfig = serde_json::from_str(r#"{"port": 8123}"#).unwrap();
        assert_eq!(restored.port, 8123);
        assert_eq!(restored.host, "127.0.0.1");
        assert!(restored.include_confidence);
    }
}
