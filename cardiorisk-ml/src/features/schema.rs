//! The model schema: ordered feature columns and the fixed-length vector they index.

use crate::error::MlError;
use serde::{Deserialize, Serialize};

/// Number of columns the classifier expects.
pub const FEATURE_COUNT: usize = 15;

/// One column of the training schema.
///
/// Variant order is the schema order; `index()` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureColumn {
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "RestingBP")]
    RestingBp,
    #[serde(rename = "Cholesterol")]
    Cholesterol,
    #[serde(rename = "FastingBS")]
    FastingBs,
    #[serde(rename = "MaxHR")]
    MaxHr,
    #[serde(rename = "Oldpeak")]
    Oldpeak,
    #[serde(rename = "Sex_M")]
    SexMale,
    #[serde(rename = "ChestPainType_ATA")]
    ChestPainAta,
    #[serde(rename = "ChestPainType_NAP")]
    ChestPainNap,
    #[serde(rename = "ChestPainType_TA")]
    ChestPainTa,
    #[serde(rename = "RestingECG_Normal")]
    RestingEcgNormal,
    #[serde(rename = "RestingECG_ST")]
    RestingEcgSt,
    #[serde(rename = "ExerciseAngina_Y")]
    ExerciseAnginaYes,
    #[serde(rename = "ST_Slope_Flat")]
    StSlopeFlat,
    #[serde(rename = "ST_Slope_Up")]
    StSlopeUp,
}

/// The column order the classifier was trained with.
pub const SCHEMA: [FeatureColumn; FEATURE_COUNT] = [
    FeatureColumn::Age,
    FeatureColumn::RestingBp,
    FeatureColumn::Cholesterol,
    FeatureColumn::FastingBs,
    FeatureColumn::MaxHr,
    FeatureColumn::Oldpeak,
    FeatureColumn::SexMale,
    FeatureColumn::ChestPainAta,
    FeatureColumn::ChestPainNap,
    FeatureColumn::ChestPainTa,
    FeatureColumn::RestingEcgNormal,
    FeatureColumn::RestingEcgSt,
    FeatureColumn::ExerciseAnginaYes,
    FeatureColumn::StSlopeFlat,
    FeatureColumn::StSlopeUp,
];

impl FeatureColumn {
    /// Training-time column name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::RestingBp => "RestingBP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "FastingBS",
            Self::MaxHr => "MaxHR",
            Self::Oldpeak => "Oldpeak",
            Self::SexMale => "Sex_M",
            Self::ChestPainAta => "ChestPainType_ATA",
            Self::ChestPainNap => "ChestPainType_NAP",
            Self::ChestPainTa => "ChestPainType_TA",
            Self::RestingEcgNormal => "RestingECG_Normal",
            Self::RestingEcgSt => "RestingECG_ST",
            Self::ExerciseAnginaYes => "ExerciseAngina_Y",
            Self::StSlopeFlat => "ST_Slope_Flat",
            Self::StSlopeUp => "ST_Slope_Up",
        }
    }

    /// Position of this column in [`SCHEMA`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the column is a 0/1 indicator rather than a copied measurement.
    pub fn is_indicator(&self) -> bool {
        self.index() >= FeatureColumn::SexMale.index()
    }

    /// Look a column up by its training-time name.
    pub fn from_name(name: &str) -> Option<Self> {
        SCHEMA.iter().copied().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Column names in schema order.
pub fn schema_names() -> Vec<&'static str> {
    SCHEMA.iter().map(FeatureColumn::name).collect()
}

/// Check that `names` lists exactly the schema columns, in schema order.
///
/// # Errors
/// `InvalidModel` on a length difference, otherwise `SchemaMismatch` at the
/// first differing position.
pub fn check_schema<S: AsRef<str>>(names: &[S]) -> Result<(), MlError> {
    if names.len() != FEATURE_COUNT {
        return Err(MlError::invalid_model(format!(
            "classifier lists {} features, expected {}",
            names.len(),
            FEATURE_COUNT
        )));
    }
    for (index, (found, expected)) in names.iter().zip(SCHEMA.iter()).enumerate() {
        if found.as_ref() != expected.name() {
            return Err(MlError::SchemaMismatch {
                index,
                expected: expected.name().to_string(),
                found: found.as_ref().to_string(),
            });
        }
    }
    Ok(())
}

/// A schema-ordered feature vector. Always exactly [`FEATURE_COUNT`] values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// An all-zero vector: every column unset.
    pub fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, column: FeatureColumn) -> f64 {
        self.0[column.index()]
    }

    pub fn set(&mut self, column: FeatureColumn, value: f64) {
        self.0[column.index()] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// `(column, value)` pairs in schema order.
    pub fn iter_named(&self) -> impl Iterator<Item = (FeatureColumn, f64)> + '_ {
        SCHEMA.iter().copied().zip(self.0.iter().copied())
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}
