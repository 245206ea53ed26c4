//! Static health recommendations keyed off simple threshold rules.

use cardiorisk_ml::{ClinicalRecord, RiskLabel};
use serde::{Deserialize, Serialize};

/// Resting blood pressure above which BP advice is given (mmHg).
pub const HIGH_BLOOD_PRESSURE: f64 = 140.0;
/// Cholesterol above which cholesterol advice is given (mg/dl).
pub const HIGH_CHOLESTEROL: f64 = 200.0;
/// Maximum heart rate above which heart-rate advice is given.
pub const HIGH_MAX_HEART_RATE: f64 = 150.0;

/// One category of advice with its tips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub tips: Vec<String>,
}

impl Recommendation {
    fn new(category: &str, tips: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            tips: tips.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Build the recommendation list for a record and its predicted label.
///
/// Measurement rules come first in a fixed order; exactly one risk-based
/// category always closes the list.
pub fn recommendations(record: &ClinicalRecord, label: RiskLabel) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if record.resting_bp > HIGH_BLOOD_PRESSURE {
        out.push(Recommendation::new(
            "Blood Pressure Management",
            &[
                "Reduce sodium intake (<2,300mg/day)",
                "Regular moderate exercise",
                "Practice stress management",
                "Monitor BP daily",
            ],
        ));
    }

    if record.cholesterol > HIGH_CHOLESTEROL {
        out.push(Recommendation::new(
            "Cholesterol Management",
            &[
                "Choose heart-healthy fats",
                "Increase fiber intake",
                "Limit saturated fats",
                "Exercise 30 minutes daily",
            ],
        ));
    }

    // Heart rate is compared in whole beats per minute.
    if record.max_hr.trunc() > HIGH_MAX_HEART_RATE {
        out.push(Recommendation::new(
            "Heart Rate Management",
            &[
                "Monitor heart rate during exercise",
                "Stay within target heart rate zone",
                "Balance exercise intensity",
            ],
        ));
    }

    out.push(match label {
        RiskLabel::High => Recommendation::new(
            "High Risk Management",
            &[
                "Consult with a cardiologist",
                "Regular health monitoring",
                "Review medications with doctor",
                "Know warning signs of heart problems",
            ],
        ),
        RiskLabel::Low => Recommendation::new(
            "Preventive Care",
            &[
                "Maintain healthy lifestyle",
                "Schedule regular check-ups",
                "Continue heart-healthy habits",
            ],
        ),
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(resting_bp: f64, cholesterol: f64, max_hr: f64) -> ClinicalRecord {
        ClinicalRecord {
            age: 55,
            sex: 1,
            chest_pain_type: 1,
            resting_bp,
            cholesterol,
            fasting_bs: 0,
            resting_ecg: 0,
            max_hr,
            exercise_angina: 0,
            oldpeak: 0.5,
            st_slope: 0,
        }
    }

    fn categories(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.category.as_str()).collect()
    }

    #[test]
    fn test_all_measurement_rules_fire_in_order() {
        let recs = recommendations(&record(160.0, 250.0, 170.0), RiskLabel::High);
        assert_eq!(
            categories(&recs),
            vec![
                "Blood Pressure Management",
                "Cholesterol Management",
                "Heart Rate Management",
                "High Risk Management",
            ]
        );
        assert_eq!(recs[0].tips.len(), 4);
        assert_eq!(recs[2].tips.len(), 3);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let recs = recommendations(&record(140.0, 200.0, 150.0), RiskLabel::Low);
        assert_eq!(categories(&recs), vec!["Preventive Care"]);
    }

    #[test]
    fn test_heart_rate_rule_ignores_fractional_beats() {
        let recs = recommendations(&record(120.0, 180.0, 150.5), RiskLabel::Low);
        assert_eq!(categories(&recs), vec!["Preventive Care"]);

        let recs = recommendations(&record(120.0, 180.0, 151.0), RiskLabel::Low);
        assert_eq!(
            categories(&recs),
            vec!["Heart Rate Management", "Preventive Care"]
        );
    }

    #[test]
    fn test_exactly_one_risk_category() {
        for label in [RiskLabel::Low, RiskLabel::High] {
            let recs = recommendations(&record(120.0, 180.0, 140.0), label);
            let risk_based = recs
                .iter()
                .filter(|r| r.category == "High Risk Management" || r.category == "Preventive Care")
                .count();
            assert_eq!(risk_based, 1);
        }
    }

    #[test]
    fn test_serializes_as_category_and_tips() {
        let recs = recommendations(&record(120.0, 180.0, 140.0), RiskLabel::Low);
        let json = serde_json::to_value(&recs).unwrap();
        assert_eq!(json[0]["category"], "Preventive Care");
        assert_eq!(json[0]["tips"][0], "Maintain healthy lifestyle");
    }
}
