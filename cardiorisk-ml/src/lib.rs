//! # cardiorisk-ml: Clinical Feature Encoding & Classifier Inference
//!
//! This crate holds everything that must agree with the trained model:
//!
//! 1. **Schema**: the fixed, ordered list of 15 columns the classifier was trained on
//! 2. **Clinical record**: the eleven raw answers of one assessment
//! 3. **Encoder**: the pure mapping from a record to a schema-ordered feature vector
//! 4. **Inference**: the `Classifier` trait and the portable model artifacts behind it
//!
//! The schema and the classifier are versioned together: a model artifact whose
//! feature names disagree with [`features::SCHEMA`] is refused at load time.

pub mod error;
pub mod features;
pub mod inference;
pub mod record;

// Re-exports
pub use error::MlError;
pub use features::{
    FEATURE_COUNT, FeatureColumn, FeatureEncoder, FeatureVector, SCHEMA, check_schema, encode,
};
pub use inference::{Classifier, ModelArtifact, Prediction, RiskLabel};
pub use record::{ChestPainType, ClinicalRecord, RestingEcg, Sex, StSlope, ValidationMode};
