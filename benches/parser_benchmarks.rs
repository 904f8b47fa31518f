#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic_in_result_fn)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tagbind::{test_utils::*, uploads::deserializer};

// Benchmark tag tree construction
fn bench_tree_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tree Builder");
    let data = TestData::load().unwrap();

    let inputs = [
        ("small", data.small.as_str()),
        ("medium", data.uploads.as_str()),
        ("large", data.large.as_str()),
    ];

    for (size, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("parse", size), input, |b, input| {
            b.iter(|| Document::parse_str(black_box(input)).unwrap());
        });
    }

    let nested = generate_nested(DEFAULT_MAX_DEPTH);
    group.bench_function("nested", |b| {
        b.iter(|| Document::parse_str(black_box(&nested)).unwrap());
    });

    group.finish();
}

// Benchmark typed deserialization of an already built tree
fn bench_deserializer(c: &mut Criterion) {
    let mut group = c.benchmark_group("Deserializer");
    let doc = Document::parse_str(&generate_uploads(2_000)).unwrap();

    group.bench_function("document", |b| {
        b.iter(|| deserializer().deserialize_document(black_box(&doc)).unwrap());
    });
    group.bench_function("clone", |b| {
        b.iter(|| black_box(&doc).root().deep_clone());
    });

    group.finish();
}

// Benchmark coercion branches
fn bench_coercion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Coercion");

    let number = Value::from("  12345  ");
    let vector = Value::from("1.5,2.5,3.5");
    let member = Value::from("ScienceAndTechnology");
    let list = Value::from("a,b,c,d,e,f,g,h");

    group.bench_function("integer", |b| {
        b.iter(|| coerce::<i64>(black_box(&number)))
    });
    group.bench_function("vector", |b| {
        b.iter(|| coerce::<Vector3<f64>>(black_box(&vector)))
    });
    group.bench_function("enumeration", |b| {
        b.iter(|| coerce::<Category>(black_box(&member)))
    });
    group.bench_function("list", |b| {
        b.iter(|| coerce::<Vec<String>>(black_box(&list)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tree_builder,
    bench_deserializer,
    bench_coercion
);
criterion_main!(benches);
