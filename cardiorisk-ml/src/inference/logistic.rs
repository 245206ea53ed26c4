//! Logistic regression over the raw feature vector.

use super::{DEFAULT_THRESHOLD, Prediction};
use crate::error::MlError;
use crate::features::{FEATURE_COUNT, FeatureVector};
use serde::{Deserialize, Serialize};

/// `p = sigmoid(w · x + b)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<(), MlError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(MlError::invalid_model(format!(
                "logistic regression has {} coefficients, expected {}",
                self.coefficients.len(),
                FEATURE_COUNT
            )));
        }
        if let Some(i) = self.coefficients.iter().position(|w| !w.is_finite()) {
            return Err(MlError::invalid_model(format!(
                "coefficient {i} is not finite"
            )));
        }
        if !self.intercept.is_finite() {
            return Err(MlError::invalid_model("intercept is not finite"));
        }
        validate_threshold(self.threshold)
    }

    /// Raw score `w · x + b`.
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    pub fn predict_proba(&self, features: &FeatureVector) -> Result<f64, MlError> {
        if self.coefficients.len() != features.len() {
            return Err(MlError::inference(format!(
                "model has {} coefficients for {} features",
                self.coefficients.len(),
                features.len()
            )));
        }
        let z = self.decision_function(features);
        if !z.is_finite() {
            return Err(MlError::inference(format!(
                "logistic score is not finite ({z})"
            )));
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, MlError> {
        let p = self.predict_proba(features)?;
        Ok(Prediction::from_probability(p, self.threshold))
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), MlError> {
    if threshold.is_finite() && threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(MlError::invalid_model(format!(
            "threshold {threshold} must lie strictly between 0 and 1"
        )))
    }
}
