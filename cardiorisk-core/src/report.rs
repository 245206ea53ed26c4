//! Plain-text assessment reports.

use crate::advice::{Recommendation, recommendations};
use cardiorisk_ml::{ClinicalRecord, Prediction};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE: &str = "Heart Disease Risk Assessment Report";

pub const MEDICAL_DISCLAIMER: &str = "Medical Disclaimer: This tool provides a preliminary risk \
assessment only. It should not be used as a substitute for professional medical advice, \
diagnosis, or treatment. Always seek the advice of your physician or other qualified health \
provider with any questions you may have regarding a medical condition.";

/// Everything needed to render one assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Local>,
    pub record: ClinicalRecord,
    pub prediction: Prediction,
    pub recommendations: Vec<Recommendation>,
}

impl AssessmentReport {
    /// Build a report, deriving recommendations from the record and label.
    pub fn new(record: ClinicalRecord, prediction: Prediction) -> Self {
        let recommendations = recommendations(&record, prediction.label);
        Self::with_recommendations(record, prediction, recommendations)
    }

    /// Build a report from recommendations computed elsewhere (e.g. by the server).
    pub fn with_recommendations(
        record: ClinicalRecord,
        prediction: Prediction,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            generated_at: Local::now(),
            record,
            prediction,
            recommendations,
        }
    }

    /// `heart_assessment_<YYYYmmdd_HHMM>.txt`
    pub fn default_file_name(&self) -> String {
        format!(
            "heart_assessment_{}.txt",
            self.generated_at.format("%Y%m%d_%H%M")
        )
    }

    /// (label, value) rows of the patient information section.
    pub fn patient_metrics(&self) -> Vec<(&'static str, String)> {
        let r = &self.record;
        let sex = if r.sex == 1 { "Male" } else { "Female" };
        vec![
            ("Age", r.age.to_string()),
            ("Sex", sex.to_string()),
            // `{:?}` keeps the decimal point on whole values (160.0) and never rounds.
            ("Blood Pressure", format!("{:?} mmHg", r.resting_bp)),
            ("Cholesterol", format!("{:?} mg/dl", r.cholesterol)),
            ("Max Heart Rate", format!("{}", r.max_hr.trunc())),
            ("ST Depression", format!("{:?}", r.oldpeak)),
        ]
    }

    pub fn render_text(&self) -> String {
        let mut text = String::new();
        text.push_str(REPORT_TITLE);
        text.push('\n');
        text.push_str(&"=".repeat(REPORT_TITLE.len()));
        text.push_str("\n\n");

        text.push_str(&format!(
            "Date: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        ));
        text.push_str(&format!("Risk Level: {}\n", self.prediction.label.label()));
        if let Some(confidence) = self.prediction.confidence() {
            text.push_str(&format!("Confidence: {:.1}%\n", confidence * 100.0));
        }

        text.push_str("\nPatient Information:\n");
        for (label, value) in self.patient_metrics() {
            text.push_str(&format!("  {}: {}\n", label, value));
        }

        text.push_str("\nRecommendations:\n");
        for rec in &self.recommendations {
            text.push_str(&format!("  {}\n", rec.category));
            for tip in &rec.tips {
                text.push_str(&format!("    - {}\n", tip));
            }
        }

        text.push('\n');
        text.push_str(MEDICAL_DISCLAIMER);
        text.push('\n');
        text
    }
}

impl std::fmt::Display for AssessmentReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}
