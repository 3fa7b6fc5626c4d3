//! Ingestion performance benchmarks.
//!
//! Measures field splitting and full case ingestion across file sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use clood::input::split_fields;
use clood::{Attribute, AttributeType, CaseIngestor, Similarity};

fn attributes() -> Vec<Attribute> {
    vec![
        Attribute::new("id", AttributeType::String, Similarity::Equal),
        Attribute::new("price", AttributeType::Float, Similarity::Interval),
        Attribute::new("year", AttributeType::Integer, Similarity::NearestNumber),
        Attribute::new("used", AttributeType::Boolean, Similarity::Equal),
        Attribute::new("extras", AttributeType::String, Similarity::Array),
        Attribute::new("location", AttributeType::Location, Similarity::NearestLocation),
    ]
}

/// Generate case rows mixing scalars, quoted commas and nested literals.
fn generate_cases(rows: usize) -> String {
    let mut data = String::from("id,price,year,used,extras,location\n");
    for row in 0..rows {
        data.push_str(&format!(
            "\"CAR-{:06}, rev {}\",{:.2},{},{},[\"sunroof\",\"towbar\"],{{\"lat\":{:.3},\"lon\":{:.3}}}\n",
            row,
            row % 7,
            row as f64 * 1.5,
            1990 + row % 30,
            row % 2 == 0,
            57.0 + (row % 100) as f64 / 1000.0,
            -2.0 - (row % 100) as f64 / 1000.0,
        ));
    }
    data
}

fn bench_split_fields(c: &mut Criterion) {
    let line = "\"CAR-000001, rev 1\",1.50,1991,false,[\"sunroof\",\"towbar\"],{\"lat\":57.001,\"lon\":-2.001}";
    c.bench_function("split_fields", |b| b.iter(|| split_fields(black_box(line))));
}

fn bench_ingest(c: &mut Criterion) {
    let attributes = attributes();
    let ingestor = CaseIngestor::new(&attributes);
    let mut group = c.benchmark_group("ingest_str");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_cases(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| ingestor.ingest_str(black_box(data)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split_fields, bench_ingest);
criterion_main!(benches);
