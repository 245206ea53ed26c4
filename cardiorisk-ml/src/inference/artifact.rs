//! Portable model artifacts.
//!
//! An artifact is a JSON document that binds fitted parameters to the schema
//! they were trained against:
//!
//! ```json
//! {
//!   "name": "heart-disease-logreg",
//!   "version": "1.0.0",
//!   "feature_names": ["Age", "RestingBP", "..."],
//!   "kind": "logistic_regression",
//!   "coefficients": [0.03, 0.02, "..."],
//!   "intercept": -1.0
//! }
//! ```

use super::forest::RandomForest;
use super::logistic::LogisticRegression;
use super::{Classifier, Prediction};
use crate::error::MlError;
use crate::features::{FeatureVector, SCHEMA, check_schema};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A fitted classifier plus the schema it expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub feature_names: Vec<String>,
    #[serde(flatten)]
    pub model: ModelKind,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

/// Supported model families.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::RandomForest(_) => "random_forest",
        }
    }
}

impl ModelArtifact {
    /// Build an artifact for the current schema.
    pub fn new(name: impl Into<String>, version: impl Into<String>, model: ModelKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            feature_names: SCHEMA.iter().map(|c| c.name().to_string()).collect(),
            model,
        }
    }

    /// Read, parse and validate an artifact file.
    pub fn load(path: &Path) -> Result<Self, MlError> {
        if !path.exists() {
            return Err(MlError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let artifact = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            name = %artifact.name,
            version = %artifact.version,
            kind = artifact.model.as_str(),
            "Model loaded"
        );
        Ok(artifact)
    }

    /// Parse and validate an artifact from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, MlError> {
        let artifact: Self = serde_json::from_str(content)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check the schema binding and the model parameters.
    pub fn validate(&self) -> Result<(), MlError> {
        check_schema(&self.feature_names)?;
        match &self.model {
            ModelKind::LogisticRegression(m) => m.validate(),
            ModelKind::RandomForest(m) => m.validate(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, MlError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Classifier for ModelArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn kind(&self) -> &str {
        self.model.as_str()
    }

    fn schema(&self) -> Vec<&str> {
        self.feature_names.iter().map(String::as_str).collect()
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, MlError> {
        let prediction = match &self.model {
            ModelKind::LogisticRegression(m) => m.predict(features)?,
            ModelKind::RandomForest(m) => m.predict(features)?,
        };
        debug!(
            model = %self.name,
            label = prediction.label.code(),
            probability = ?prediction.probability,
            "Prediction computed"
        );
        Ok(prediction)
    }
}
