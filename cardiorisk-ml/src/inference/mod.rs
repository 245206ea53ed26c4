//! Inference: the classifier seam and the model artifacts behind it.

pub mod artifact;
pub mod forest;
pub mod logistic;

pub use artifact::{ModelArtifact, ModelKind};
pub use forest::{DecisionTree, RandomForest};
pub use logistic::LogisticRegression;

use crate::error::MlError;
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Default decision threshold on P(high risk).
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// A trained binary classifier bound to the feature schema.
///
/// Implementations are read-only after construction and shared across request
/// handlers behind an `Arc`.
pub trait Classifier: Send + Sync {
    /// Human-readable model name.
    fn name(&self) -> &str;

    /// Model version string.
    fn version(&self) -> &str {
        "unversioned"
    }

    /// Model family, e.g. `"random_forest"`.
    fn kind(&self) -> &str;

    /// Feature columns the model was trained on, in order.
    ///
    /// Must equal [`crate::features::SCHEMA`] for the classifier to be served.
    fn schema(&self) -> Vec<&str>;

    /// Classify one encoded record.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, MlError>;
}

/// Binary risk label. Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskLabel {
    Low = 0,
    High = 1,
}

impl RiskLabel {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_high(self) -> bool {
        self == Self::High
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

impl From<RiskLabel> for u8 {
    fn from(label: RiskLabel) -> Self {
        label.code()
    }
}

impl TryFrom<u8> for RiskLabel {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            other => Err(format!("invalid risk label {other}, expected 0 or 1")),
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier output for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: RiskLabel,
    /// P(label = High), when the model exposes probabilities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

impl Prediction {
    pub fn new(label: RiskLabel) -> Self {
        Self {
            label,
            probability: None,
        }
    }

    /// Label `probability` against `threshold`. High only when strictly above it.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        let label = if probability > threshold {
            RiskLabel::High
        } else {
            RiskLabel::Low
        };
        Self {
            label,
            probability: Some(probability),
        }
    }

    /// Probability of the predicted label.
    pub fn confidence(&self) -> Option<f64> {
        self.probability.map(|p| match self.label {
            RiskLabel::High => p,
            RiskLabel::Low => 1.0 - p,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_label_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&RiskLabel::High).unwrap(), "1");
        assert_eq!(serde_json::to_string(&RiskLabel::Low).unwrap(), "0");
        assert_eq!(serde_json::from_str::<RiskLabel>("1").unwrap(), RiskLabel::High);
        assert!(serde_json::from_str::<RiskLabel>("2").is_err());
    }

    #[test]
    fn test_prediction_from_probability() {
        let high = Prediction::from_probability(0.8, DEFAULT_THRESHOLD);
        assert_eq!(high.label, RiskLabel::High);
        assert_eq!(high.confidence(), Some(0.8));

        let low = Prediction::from_probability(0.25, DEFAULT_THRESHOLD);
        assert_eq!(low.label, RiskLabel::Low);
        assert_eq!(low.confidence(), Some(0.75));
    }

    #[test]
    fn test_prediction_at_threshold_is_low() {
        let p = Prediction::from_probability(0.5, DEFAULT_THRESHOLD);
        assert_eq!(p.label, RiskLabel::Low);
    }

    #[test]
    fn test_prediction_without_probability() {
        let p = Prediction::new(RiskLabel::High);
        assert_eq!(p.confidence(), None);
        let json = serde_json::to_value(p).unwrap();
        assert!(json.get("probability").is_none());
    }
}
