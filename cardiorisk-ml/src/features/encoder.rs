//! Feature encoder: clinical record to schema-ordered vector.
//!
//! Categorical fields use drop-first indicator encoding. The last documented code
//! of each group (asymptomatic chest pain, LV hypertrophy, downsloping ST) has no
//! column, so it encodes as an all-zero group. Unrecognized codes encode the same
//! way and are not rejected here.

use super::schema::{FeatureColumn, FeatureVector};
use crate::record::ClinicalRecord;

/// Stateless encoder handle. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, record: &ClinicalRecord) -> FeatureVector {
        encode(record)
    }
}

/// Encode a record into the 15-column feature vector.
pub fn encode(record: &ClinicalRecord) -> FeatureVector {
    let mut v = FeatureVector::zeros();

    v.set(FeatureColumn::Age, f64::from(record.age));
    v.set(FeatureColumn::RestingBp, record.resting_bp);
    v.set(FeatureColumn::Cholesterol, record.cholesterol);
    v.set(FeatureColumn::FastingBs, record.fasting_bs as f64);
    v.set(FeatureColumn::MaxHr, record.max_hr);
    v.set(FeatureColumn::Oldpeak, record.oldpeak);

    if record.sex == 1 {
        v.set(FeatureColumn::SexMale, 1.0);
    }
    if record.exercise_angina == 1 {
        v.set(FeatureColumn::ExerciseAnginaYes, 1.0);
    }

    let chest_pain = match record.chest_pain_type {
        0 => Some(FeatureColumn::ChestPainTa),
        1 => Some(FeatureColumn::ChestPainAta),
        2 => Some(FeatureColumn::ChestPainNap),
        _ => None,
    };
    let resting_ecg = match record.resting_ecg {
        0 => Some(FeatureColumn::RestingEcgNormal),
        1 => Some(FeatureColumn::RestingEcgSt),
        _ => None,
    };
    let st_slope = match record.st_slope {
        0 => Some(FeatureColumn::StSlopeUp),
        1 => Some(FeatureColumn::StSlopeFlat),
        _ => None,
    };

    for column in [chest_pain, resting_ecg, st_slope].into_iter().flatten() {
        v.set(column, 1.0);
    }

    v
}
