//! Error types for the cardiorisk-ml crate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for encoding and inference operations.
#[derive(Debug, Error)]
pub enum MlError {
    #[error("Model file not found: {}", path.display())]
    ModelNotFound { path: PathBuf },

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("Model schema mismatch at column {index}: expected '{expected}', found '{found}'")]
    SchemaMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl MlError {
    pub fn invalid_model(msg: impl Into<String>) -> Self {
        Self::InvalidModel(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }
}
