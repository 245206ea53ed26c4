//! Checks the model artifact shipped in `models/` against the published example profiles.

use cardiorisk_ml::{Classifier, ClinicalRecord, ModelArtifact, RiskLabel, encode};
use std::path::PathBuf;

fn bundled_model() -> ModelArtifact {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("models")
        .join("heart_model.json");
    ModelArtifact::load(&path).expect("bundled model should load")
}

#[test]
fn bundled_model_is_bound_to_schema() {
    let model = bundled_model();
    assert_eq!(model.kind(), "logistic_regression");
    assert_eq!(model.feature_names, cardiorisk_ml::features::schema_names());
}

#[test]
fn low_risk_profile_predicts_low() {
    let record = ClinicalRecord {
        age: 40,
        sex: 1,
        chest_pain_type: 0,
        resting_bp: 80.0,
        cholesterol: 100.0,
        fasting_bs: 0,
        resting_ecg: 0,
        max_hr: 60.0,
        exercise_angina: 0,
        oldpeak: 0.0,
        st_slope: 0,
    };
    let prediction = bundled_model().predict(&encode(&record)).unwrap();
    assert_eq!(prediction.label, RiskLabel::Low);
}

#[test]
fn high_risk_profile_predicts_high() {
    let record = ClinicalRecord {
        age: 49,
        sex: 0,
        chest_pain_type: 2,
        resting_bp: 160.0,
        cholesterol: 180.0,
        fasting_bs: 0,
        resting_ecg: 0,
        max_hr: 156.0,
        exercise_angina: 0,
        oldpeak: 1.0,
        st_slope: 1,
    };
    let prediction = bundled_model().predict(&encode(&record)).unwrap();
    assert_eq!(prediction.label, RiskLabel::High);
    assert!(prediction.confidence().unwrap() > 0.5);
}
