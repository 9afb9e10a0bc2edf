use clinical_features::Disease;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use inference_engine::{ArtifactPaths, PredictionEngine};
use std::path::PathBuf;

fn bench_dispatch(c: &mut Criterion) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models");
    let engine = PredictionEngine::load(&ArtifactPaths::in_dir(dir)).expect("sample artifacts load");

    let heart = [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0];
    let diabetes = [6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0];
    let parkinsons = [0.5; 22];

    c.bench_function("dispatch_heart_logistic", |b| {
        b.iter(|| engine.predict(Disease::Heart, black_box(&heart)))
    });
    c.bench_function("dispatch_diabetes_linear_svm", |b| {
        b.iter(|| engine.predict(Disease::Diabetes, black_box(&diabetes)))
    });
    c.bench_function("dispatch_parkinsons_kernel_svm", |b| {
        b.iter(|| engine.predict(Disease::Parkinsons, black_box(&parkinsons)))
    });
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
