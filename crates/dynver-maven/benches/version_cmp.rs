//! Benchmarks for Maven version parsing, comparison and listing order.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dynver_maven::{ComparableVersion, sort_versions};
use std::hint::black_box;

const PAIRS: &[(&str, &str)] = &[
    ("1.82", "1.82.0"),
    ("6.1.0rc3", "6.1H.5-beta"),
    ("1.0-alpha-1-SNAPSHOT", "1.0-alpha-1"),
    ("20190126.230843", "12345678901234567890.1H.5-beta"),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for version in ["1.0", "5.3.30", "1.0-alpha-1-SNAPSHOT", "Moore-SR3"] {
        group.bench_with_input(BenchmarkId::from_parameter(version), version, |b, v| {
            b.iter(|| ComparableVersion::new(black_box(v)));
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    for (sa, sb) in PAIRS {
        let va = ComparableVersion::new(*sa);
        let vb = ComparableVersion::new(*sb);
        c.bench_function(&format!("Compare {sa} and {sb}"), |b| {
            b.iter(|| black_box(va.cmp(&vb)));
        });
    }
}

fn bench_sort_listing(c: &mut Criterion) {
    let mut versions: Vec<String> = (0..20)
        .flat_map(|minor| {
            (0..10).flat_map(move |patch| {
                [
                    format!("5.{minor}.{patch}"),
                    format!("5.{minor}.{patch}-RC1"),
                    format!("5.{minor}.{patch}.M2"),
                ]
            })
        })
        .collect();
    versions.extend(["Kay-SR1", "Lovelace-RELEASE", "Moore-SR3"].map(String::from));
    versions.reverse();

    c.bench_function("sort_versions 603 entries", |b| {
        b.iter(|| sort_versions(black_box(versions.clone())));
    });
}

criterion_group!(benches, bench_parse, bench_compare, bench_sort_listing);
criterion_main!(benches);
