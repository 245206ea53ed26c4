use cardiorisk_ml::features::{FEATURE_COUNT, encode};
use cardiorisk_ml::inference::{DecisionTree, LogisticRegression, ModelKind, RandomForest};
use cardiorisk_ml::{Classifier, ClinicalRecord, ModelArtifact};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn sample_record() -> ClinicalRecord {
    ClinicalRecord {
        age: 54,
        sex: 1,
        chest_pain_type: 1,
        resting_bp: 138.0,
        cholesterol: 214.0,
        fasting_bs: 0,
        resting_ecg: 1,
        max_hr: 142.0,
        exercise_angina: 1,
        oldpeak: 1.6,
        st_slope: 1,
    }
}

fn bench_encoder(c: &mut Criterion) {
    let record = sample_record();
    c.bench_function("encode_record", |b| b.iter(|| encode(black_box(&record))));
}

fn bench_inference(c: &mut Criterion) {
    let features = encode(&sample_record());

    let logistic = ModelArtifact::new(
        "bench-logreg",
        "0.0.0",
        ModelKind::LogisticRegression(LogisticRegression {
            coefficients: vec![0.01; FEATURE_COUNT],
            intercept: -1.0,
            threshold: 0.5,
        }),
    );
    c.bench_function("logistic_predict", |b| {
        b.iter(|| logistic.predict(black_box(&features)))
    });

    let forest = ModelArtifact::new(
        "bench-forest",
        "0.0.0",
        ModelKind::RandomForest(RandomForest {
            trees: (0..100)
                .map(|i| DecisionTree::constant(f64::from(i) / 100.0))
                .collect(),
            threshold: 0.5,
        }),
    );
    c.bench_function("forest_predict_100_trees", |b| {
        b.iter(|| forest.predict(black_box(&features)))
    });
}

criterion_group!(benches, bench_encoder, bench_inference);
criterion_main!(benches);
