//! The prediction service injected into the gateway.

use crate::config::CardioConfig;
use crate::error::{CardioError, PredictionError};
use cardiorisk_ml::{
    Classifier, ClinicalRecord, FeatureEncoder, FeatureVector, MlError, ModelArtifact, Prediction,
    ValidationMode, check_schema,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The classifier loaded at startup, or the reason it could not be.
#[derive(Clone)]
pub enum ModelHandle {
    Ready(Arc<dyn Classifier>),
    Unavailable { reason: String },
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(c) => f
                .debug_struct("Ready")
                .field("name", &c.name())
                .field("version", &c.version())
                .field("kind", &c.kind())
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

impl ModelHandle {
    /// Load an artifact, recording the failure instead of returning it.
    pub fn load(path: &Path) -> Self {
        match ModelArtifact::load(path) {
            Ok(artifact) => Self::Ready(Arc::new(artifact)),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load model");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Wrap a classifier after checking it was trained on the current schema.
    pub fn ready(classifier: Arc<dyn Classifier>) -> Result<Self, MlError> {
        check_schema(&classifier.schema())?;
        Ok(Self::Ready(classifier))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn classifier(&self) -> Result<&Arc<dyn Classifier>, PredictionError> {
        match self {
            Self::Ready(c) => Ok(c),
            Self::Unavailable { reason } => Err(PredictionError::ModelUnavailable(reason.clone())),
        }
    }
}

/// Validates, encodes and classifies one record at a time.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: ModelHandle,
    encoder: FeatureEncoder,
    validation: ValidationMode,
}

impl Predictor {
    /// # Errors
    /// `SchemaMismatch` (or `InvalidModel`) if a ready classifier reports feature
    /// columns other than the encoder's schema.
    pub fn new(model: ModelHandle, validation: ValidationMode) -> Result<Self, MlError> {
        if let ModelHandle::Ready(classifier) = &model {
            check_schema(&classifier.schema())?;
        }
        Ok(Self {
            model,
            encoder: FeatureEncoder::new(),
            validation,
        })
    }

    /// A predictor around an already-constructed classifier, with lenient validation.
    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Result<Self, MlError> {
        Self::new(ModelHandle::ready(classifier)?, ValidationMode::Lenient)
    }

    /// Build from configuration, loading the model artifact.
    ///
    /// A load failure is fatal unless `server.allow_degraded_start` is set.
    pub fn from_config(config: &CardioConfig) -> Result<Self, CardioError> {
        let model = match ModelArtifact::load(&config.model.path) {
            Ok(artifact) => ModelHandle::Ready(Arc::new(artifact)),
            Err(e) if config.server.allow_degraded_start => {
                warn!(
                    path = %config.model.path.display(),
                    error = %e,
                    "Model failed to load; starting in degraded mode"
                );
                ModelHandle::Unavailable {
                    reason: e.to_string(),
                }
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::new(model, config.validation.mode)?)
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    /// Encode without classifying.
    pub fn encode(&self, record: &ClinicalRecord) -> FeatureVector {
        self.encoder.encode(record)
    }

    /// Run one record through validation, encoding and the classifier.
    pub fn predict(&self, record: &ClinicalRecord) -> Result<Prediction, PredictionError> {
        let classifier = self.model.classifier()?;
        record
            .validate(self.validation)
            .map_err(PredictionError::Validation)?;

        let features = self.encoder.encode(record);
        let prediction = classifier.predict(&features).map_err(|e| {
            warn!(model = classifier.name(), error = %e, "Inference failed");
            PredictionError::Inference(e.to_string())
        })?;

        debug!(
            label = prediction.label.code(),
            probability = ?prediction.probability,
            "Prediction served"
        );
        Ok(prediction)
    }
}
