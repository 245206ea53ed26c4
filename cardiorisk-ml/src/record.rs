//! The clinical input record: one assessment's raw answers.
//!
//! Wire names follow the client contract (`ChestPainType`, `RestingBp`, ...); the
//! snake_case field names are accepted as aliases. Category fields are kept as raw
//! signed codes so that unrecognized values survive parsing and reach the encoder.

use serde::{Deserialize, Serialize};

/// One patient's measurements as entered. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    /// Age in years.
    pub age: u32,
    /// 1 = male, 0 = female.
    pub sex: i64,
    /// 0 = typical angina, 1 = atypical angina, 2 = non-anginal pain, 3 = asymptomatic.
    #[serde(rename = "ChestPainType", alias = "chest_pain_type")]
    pub chest_pain_type: i64,
    /// Resting blood pressure in mmHg.
    #[serde(rename = "RestingBp", alias = "resting_bp")]
    pub resting_bp: f64,
    /// Serum cholesterol in mg/dl.
    #[serde(rename = "Cholesterol", alias = "cholesterol")]
    pub cholesterol: f64,
    /// 1 = fasting blood sugar > 120 mg/dl.
    #[serde(rename = "FastingBS", alias = "fasting_bs")]
    pub fasting_bs: i64,
    /// 0 = normal, 1 = ST-T abnormality, 2 = left ventricular hypertrophy.
    #[serde(rename = "RestingECG", alias = "resting_ecg")]
    pub resting_ecg: i64,
    /// Maximum heart rate achieved.
    #[serde(rename = "MaxHR", alias = "max_hr")]
    pub max_hr: f64,
    /// 1 = exercise-induced angina present.
    #[serde(rename = "ExerciseAngina", alias = "exercise_angina")]
    pub exercise_angina: i64,
    /// ST depression.
    #[serde(rename = "Oldpeak", alias = "oldpeak")]
    pub oldpeak: f64,
    /// 0 = upsloping, 1 = flat, 2 = downsloping.
    #[serde(rename = "ST_Slope", alias = "st_slope")]
    pub st_slope: i64,
}

/// How strictly the request boundary checks a record before encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Reject only non-finite measurements. Unknown codes collapse to the baseline.
    #[default]
    Lenient,
    /// Enforce every documented field domain.
    Strict,
}

impl ClinicalRecord {
    /// Check the record against the chosen validation mode.
    ///
    /// # Errors
    /// Returns every violation found, not just the first.
    pub fn validate(&self, mode: ValidationMode) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("RestingBp", self.resting_bp),
            ("Cholesterol", self.cholesterol),
            ("MaxHR", self.max_hr),
            ("Oldpeak", self.oldpeak),
        ] {
            if !value.is_finite() {
                errors.push(format!("{field} must be a finite number"));
            }
        }

        if mode == ValidationMode::Strict {
            for (field, value) in [
                ("sex", self.sex),
                ("FastingBS", self.fasting_bs),
                ("ExerciseAngina", self.exercise_angina),
            ] {
                if value != 0 && value != 1 {
                    errors.push(format!("{field} {value} must be 0 or 1"));
                }
            }
            if ChestPainType::from_code(self.chest_pain_type).is_none() {
                errors.push(format!(
                    "ChestPainType {} out of range [0, 3]",
                    self.chest_pain_type
                ));
            }
            if RestingEcg::from_code(self.resting_ecg).is_none() {
                errors.push(format!(
                    "RestingECG {} out of range [0, 2]",
                    self.resting_ecg
                ));
            }
            if StSlope::from_code(self.st_slope).is_none() {
                errors.push(format!("ST_Slope {} out of range [0, 2]", self.st_slope));
            }
            if self.resting_bp < 0.0 {
                errors.push(format!("RestingBp {} must be >= 0", self.resting_bp));
            }
            if self.cholesterol < 0.0 {
                errors.push(format!("Cholesterol {} must be >= 0", self.cholesterol));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn sex(&self) -> Option<Sex> {
        Sex::from_code(self.sex)
    }

    pub fn chest_pain(&self) -> Option<ChestPainType> {
        ChestPainType::from_code(self.chest_pain_type)
    }

    pub fn resting_ecg(&self) -> Option<RestingEcg> {
        RestingEcg::from_code(self.resting_ecg)
    }

    pub fn st_slope(&self) -> Option<StSlope> {
        StSlope::from_code(self.st_slope)
    }
}

/// Biological sex as coded by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Female),
            1 => Some(Self::Male),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

/// Chest pain classification. `Asymptomatic` is the baseline with no column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl ChestPainType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::TypicalAngina),
            1 => Some(Self::AtypicalAngina),
            2 => Some(Self::NonAnginalPain),
            3 => Some(Self::Asymptomatic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TypicalAngina => "Typical Angina",
            Self::AtypicalAngina => "Atypical Angina",
            Self::NonAnginalPain => "Non-anginal Pain",
            Self::Asymptomatic => "Asymptomatic",
        }
    }
}

/// Resting ECG result. `LeftVentricularHypertrophy` is the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LeftVentricularHypertrophy,
}

impl RestingEcg {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::StTAbnormality),
            2 => Some(Self::LeftVentricularHypertrophy),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StTAbnormality => "ST-T Wave Abnormality",
            Self::LeftVentricularHypertrophy => "Left Ventricular Hypertrophy",
        }
    }
}

/// Slope of the peak exercise ST segment. `Downsloping` is the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StSlope {
    Upsloping,
    Flat,
    Downsloping,
}

impl StSlope {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Upsloping),
            1 => Some(Self::Flat),
            2 => Some(Self::Downsloping),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upsloping => "Upsloping",
            Self::Flat => "Flat",
            Self::Downsloping => "Downsloping",
        }
    }
}
