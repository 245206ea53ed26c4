//! Property-based tests for the feature encoder using proptest.

use proptest::prelude::*;

use cardiorisk_ml::features::{FEATURE_COUNT, FeatureColumn, FeatureVector, encode};
use cardiorisk_ml::record::ClinicalRecord;

const CHEST_PAIN: [FeatureColumn; 3] = [
    FeatureColumn::ChestPainTa,
    FeatureColumn::ChestPainAta,
    FeatureColumn::ChestPainNap,
];
const RESTING_ECG: [FeatureColumn; 2] = [FeatureColumn::RestingEcgNormal, FeatureColumn::RestingEcgSt];
const ST_SLOPE: [FeatureColumn; 2] = [FeatureColumn::StSlopeUp, FeatureColumn::StSlopeFlat];

fn in_domain_record() -> impl Strategy<Value = ClinicalRecord> {
    (
        (0u32..120, 0i64..=1, 0i64..=3, 0.0f64..250.0, 0.0f64..600.0, 0i64..=1),
        (0i64..=2, 40.0f64..220.0, 0i64..=1, -3.0f64..7.0, 0i64..=2),
    )
        .prop_map(
            |(
                (age, sex, chest_pain_type, resting_bp, cholesterol, fasting_bs),
                (resting_ecg, max_hr, exercise_angina, oldpeak, st_slope),
            )| ClinicalRecord {
                age,
                sex,
                chest_pain_type,
                resting_bp,
                cholesterol,
                fasting_bs,
                resting_ecg,
                max_hr,
                exercise_angina,
                oldpeak,
                st_slope,
            },
        )
}

/// Any record the wire format can carry, including unknown category codes.
fn any_record() -> impl Strategy<Value = ClinicalRecord> {
    (in_domain_record(), any::<i64>(), any::<i64>(), any::<i64>(), any::<i64>()).prop_map(
        |(base, sex, chest_pain_type, resting_ecg, st_slope)| ClinicalRecord {
            sex,
            chest_pain_type,
            resting_ecg,
            st_slope,
            ..base
        },
    )
}

fn group_sum(v: &FeatureVector, group: &[FeatureColumn]) -> f64 {
    group.iter().map(|c| v.get(*c)).sum()
}

proptest! {
    #[test]
    fn encoded_vector_has_fixed_shape(record in in_domain_record()) {
        let v = encode(&record);
        prop_assert_eq!(v.as_slice().len(), FEATURE_COUNT);

        prop_assert_eq!(v.get(FeatureColumn::Age), f64::from(record.age));
        prop_assert_eq!(v.get(FeatureColumn::RestingBp), record.resting_bp);
        prop_assert_eq!(v.get(FeatureColumn::Cholesterol), record.cholesterol);
        prop_assert_eq!(v.get(FeatureColumn::FastingBs), record.fasting_bs as f64);
        prop_assert_eq!(v.get(FeatureColumn::MaxHr), record.max_hr);
        prop_assert_eq!(v.get(FeatureColumn::Oldpeak), record.oldpeak);

        for (column, value) in v.iter_named() {
            if column.is_indicator() {
                prop_assert!(value == 0.0 || value == 1.0, "{} = {}", column, value);
            }
        }
    }

    #[test]
    fn at_most_one_indicator_per_group(record in any_record()) {
        let v = encode(&record);
        prop_assert!(group_sum(&v, &CHEST_PAIN) <= 1.0);
        prop_assert!(group_sum(&v, &RESTING_ECG) <= 1.0);
        prop_assert!(group_sum(&v, &ST_SLOPE) <= 1.0);
    }

    #[test]
    fn encoding_is_deterministic(record in any_record()) {
        let first = encode(&record);
        let second = encode(&record);
        let first_bits: Vec<u64> = first.as_slice().iter().map(|x| x.to_bits()).collect();
        let second_bits: Vec<u64> = second.as_slice().iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn unknown_codes_collapse_to_baseline(record in in_domain_record(), code in 3i64..10_000) {
        let baseline = encode(&ClinicalRecord { chest_pain_type: 3, resting_ecg: 2, st_slope: 2, ..record.clone() });
        let unknown = encode(&ClinicalRecord {
            chest_pain_type: code,
            resting_ecg: code,
            st_slope: code,
            ..record
        });
        prop_assert_eq!(baseline, unknown);
        prop_assert_eq!(group_sum(&unknown, &CHEST_PAIN), 0.0);
        prop_assert_eq!(group_sum(&unknown, &RESTING_ECG), 0.0);
        prop_assert_eq!(group_sum(&unknown, &ST_SLOPE), 0.0);
    }

    #[test]
    fn documented_codes_set_exactly_one_indicator(
        record in in_domain_record(),
        chest_pain_type in 0i64..=2,
        resting_ecg in 0i64..=1,
        st_slope in 0i64..=1,
    ) {
        let v = encode(&ClinicalRecord { chest_pain_type, resting_ecg, st_slope, ..record });
        prop_assert_eq!(group_sum(&v, &CHEST_PAIN), 1.0);
        prop_assert_eq!(group_sum(&v, &RESTING_ECG), 1.0);
        prop_assert_eq!(group_sum(&v, &ST_SLOPE), 1.0);
    }
}

#[test]
fn asymptomatic_and_out_of_range_chest_pain_are_indistinguishable() {
    let base = ClinicalRecord {
        age: 40,
        sex: 1,
        chest_pain_type: 3,
        resting_bp: 80.0,
        cholesterol: 100.0,
        fasting_bs: 0,
        resting_ecg: 0,
        max_hr: 60.0,
        exercise_angina: 0,
        oldpeak: 0.0,
        st_slope: 0,
    };
    let asymptomatic = encode(&base);
    let out_of_range = encode(&ClinicalRecord {
        chest_pain_type: 99,
        ..base
    });

    let sub = |v: &FeatureVector| CHEST_PAIN.map(|c| v.get(c));
    assert_eq!(sub(&asymptomatic), [0.0, 0.0, 0.0]);
    assert_eq!(sub(&asymptomatic), sub(&out_of_range));
}
