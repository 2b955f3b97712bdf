//! Criterion micro-benchmarks for whole-message decode, build, and field access.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use stepwire_bench::{reference_message, stress_message, Payload, Profile};
use stepwire_engine::{PackageConfig, StepPackage};

fn package() -> StepPackage {
    StepPackage::new(PackageConfig::default()).unwrap()
}

/// Benchmark: decode a 100-record message into a reused package.
fn bench_decode_reference(c: &mut Criterion) {
    let wire = reference_message(42).unwrap();
    let mut pkg = package();

    c.bench_function("package_decode_reference", |b| {
        b.iter(|| {
            pkg.set_package(black_box(&wire)).unwrap();
            black_box(pkg.records_count());
        });
    });
}

/// Benchmark: decode a 2000-record message into a reused package.
fn bench_decode_stress(c: &mut Criterion) {
    let wire = stress_message(42).unwrap();
    let mut pkg = package();

    c.bench_function("package_decode_stress", |b| {
        b.iter(|| {
            pkg.set_package(black_box(&wire)).unwrap();
            black_box(pkg.records_count());
        });
    });
}

/// Benchmark: build and serialise a 100-record message.
fn bench_build_reference(c: &mut Criterion) {
    let payload = Payload::generate(Profile::REFERENCE, 42);
    let mut pkg = package();

    c.bench_function("package_build_reference", |b| {
        b.iter(|| {
            payload.build_into(&mut pkg).unwrap();
            black_box(pkg.to_wire());
        });
    });
}

/// Benchmark: look up the last field of every record.
fn bench_scan_last_field(c: &mut Criterion) {
    let wire = reference_message(42).unwrap();
    let mut pkg = package();
    pkg.set_package(&wire).unwrap();
    let last = 10 + Profile::REFERENCE.fields_per_record as i32 - 1;

    c.bench_function("package_scan_last_field", |b| {
        b.iter(|| {
            pkg.goto_first();
            for _ in 0..pkg.records_count() {
                black_box(pkg.find_item(last));
                pkg.goto_next();
            }
        });
    });
}

/// Benchmark: rewrite one field in every record.
fn bench_set_field_value(c: &mut Criterion) {
    let wire = reference_message(42).unwrap();
    let mut pkg = package();

    c.bench_function("package_set_field_value", |b| {
        b.iter(|| {
            pkg.set_package(&wire).unwrap();
            for i in 0..pkg.records_count() {
                pkg.set_field_value(11, i).unwrap();
                pkg.goto_next();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_decode_reference,
    bench_decode_stress,
    bench_build_reference,
    bench_scan_last_field,
    bench_set_field_value
);
criterion_main!(benches);
