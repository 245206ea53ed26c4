//! Error types for the Cardiorisk service core.
//!
//! Uses `thiserror` for public API error types. `PredictionError` is the typed
//! outcome of one prediction request and maps one-to-one onto HTTP statuses in
//! the gateway.

use cardiorisk_ml::MlError;
use std::path::PathBuf;

/// Top-level error type for the Cardiorisk core library.
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error("Model error: {0}")]
    Ml(#[from] MlError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// Why a single prediction request did not produce a label.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("Invalid clinical input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

impl PredictionError {
    /// Stable machine-readable kind, used in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::Inference(_) => "inference_failed",
        }
    }
}

/// Result type alias for Cardiorisk core operations.
pub type Result<T> = std::result::Result<T, CardioError>;
