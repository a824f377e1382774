//! Containment search and enforcement benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filterguard_core::{contains_field, Document, EnforcerConfig, FilterEnforcer, Predicate};

/// `{"$or": [{"f0": 0}, {"f1": 1}, ...]}` with `width` branches.
fn wide_filter(width: usize) -> Predicate {
    let branches: Vec<Predicate> = (0..width)
        .map(|i| Document::new().with(format!("f{i}"), i as i64).into())
        .collect();
    Predicate::document([("$or", Predicate::Sequence(branches))])
}

/// `depth` alternating levels of `$and` documents and single-element lists.
fn deep_filter(depth: usize) -> Predicate {
    let mut filter = Predicate::from(Document::new().with("needle", 1));
    for _ in 0..depth {
        filter = Predicate::document([("$and", Predicate::sequence([filter]))]);
    }
    filter
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("containment/wide");

    for width in [10, 100, 1000] {
        let filter = wide_filter(width);
        let last = format!("f{}", width - 1);

        group.bench_with_input(BenchmarkId::new("last_branch", width), &width, |b, _| {
            b.iter(|| black_box(contains_field(&filter, &last)));
        });

        group.bench_with_input(BenchmarkId::new("absent", width), &width, |b, _| {
            b.iter(|| black_box(contains_field(&filter, "absent")));
        });
    }

    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("containment/deep");

    for depth in [8, 64, 256] {
        let filter = deep_filter(depth);
        group.bench_with_input(BenchmarkId::new("needle", depth), &depth, |b, _| {
            b.iter(|| black_box(contains_field(&filter, "needle")));
        });
    }

    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("enforcer/check");

    let enforcer = FilterEnforcer::from_config(
        &EnforcerConfig::new().with_required_filters("orders:tenantId,orders:region,orders:day"),
    )
    .unwrap();
    let filter: Predicate = serde_json::from_str(
        r#"{"$and": [{"tenantId": "t1"}, {"region": {"$in": ["us", "eu"]}}, {"day": {"$gte": 20240101}}]}"#,
    )
    .unwrap();

    group.bench_function("accepted", |b| {
        b.iter(|| black_box(enforcer.check("orders", &filter)));
    });

    group.bench_function("unconfigured", |b| {
        b.iter(|| black_box(enforcer.check("logs", &filter)));
    });

    group.finish();
}

criterion_group!(benches, bench_wide, bench_deep, bench_check);
criterion_main!(benches);
