//! Benchmark for generating SQL from an in-memory knowledge base.
//!
//! Measures the full pass (CSV decoding, normalization, rendering) for each
//! target over inputs of increasing size.

use competitor_sqlgen::{CsvSource, Generator, GeneratorConfig, MetricsMode};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;

const HEADER: &str = "competitor_name,metal,use_category,region,business_type,price_positioning,\
national_chain_presence,website,instagram_handle,facebook_account,city,state,locality,\
store_count,branch_count,rating_avg,review_count,market_presence_label\n";

/// Build a knowledge base where every fourth row repeats an earlier name.
fn knowledge_base(rows: usize) -> String {
    let mut csv = String::from(HEADER);
    for i in 0..rows {
        let name = if i % 4 == 3 { i - 3 } else { i };
        writeln!(
            csv,
            "Jeweller's {name},Gold,Bridal,South,Showroom,Premium,{},https://j{name}.example,,,\
             City {},State {},,{},{},4.{},{},Strong",
            if i % 2 == 0 { "Yes" } else { "No" },
            i % 40,
            i % 12,
            i % 9,
            i % 3,
            i % 10,
            i * 7,
        )
        .unwrap();
    }
    csv
}

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for rows in [100usize, 1_000, 10_000] {
        let csv = knowledge_base(rows);
        group.throughput(Throughput::Elements(rows as u64));

        let config = GeneratorConfig::new("bench.csv");
        group.bench_with_input(BenchmarkId::new("competitors", rows), &csv, |b, csv| {
            b.iter(|| {
                let mut source = CsvSource::from_reader(csv.as_bytes()).unwrap();
                let mut out = Vec::with_capacity(csv.len() * 2);
                Generator::new(&config)
                    .competitors(&mut source, &mut out)
                    .unwrap();
                black_box(out)
            });
        });

        for mode in [MetricsMode::Deduplicated, MetricsMode::PerRow] {
            let config = GeneratorConfig::new("bench.csv").metrics_mode(mode);
            group.bench_with_input(
                BenchmarkId::new(format!("metrics_{mode}"), rows),
                &csv,
                |b, csv| {
                    b.iter(|| {
                        let mut source = CsvSource::from_reader(csv.as_bytes()).unwrap();
                        let mut out = Vec::with_capacity(csv.len() * 2);
                        Generator::new(&config).metrics(&mut source, &mut out).unwrap();
                        black_box(out)
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_generators);
criterion_main!(benches);
