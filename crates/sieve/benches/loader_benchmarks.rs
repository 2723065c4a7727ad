//! Loader and writer performance benchmarks.
//!
//! Measures CSV parsing into a dataset and writing it back out.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sieve::{Loader, Writer};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate a sensor-style CSV with roughly 10% absent cells.
fn generate_quality_data(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let sites = ["north", "south", "east", "west"];
    let markers = ["", "NA", "null"];

    let mut data = String::from("Serial Number,site,temperature,humidity,count\n");
    for row in 0..rows {
        data.push_str(&format!("{:02}AB,", row % 100));
        data.push_str(sites[row % sites.len()]);
        data.push(',');
        for col in 0..3 {
            if rng.gen_bool(0.1) {
                data.push_str(markers[rng.gen_range(0..markers.len())]);
            } else if col == 2 {
                data.push_str(&rng.gen_range(0..500).to_string());
            } else {
                data.push_str(&format!("{:.2}", rng.gen_range(0.0..100.0)));
            }
            data.push(if col == 2 { '\n' } else { ',' });
        }
    }
    data
}

fn bench_load_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_str");
    let loader = Loader::new();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_quality_data(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| loader.load_str(black_box(data)).unwrap())
        });
    }

    group.finish();
}

fn bench_load_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_file");
    let loader = Loader::new();

    for rows in [1_000, 10_000].iter() {
        let data = generate_quality_data(*rows);
        let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
        temp.write_all(data.as_bytes()).unwrap();
        temp.flush().unwrap();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), temp.path(), |b, path| {
            b.iter(|| loader.load(black_box(path)).unwrap())
        });
    }

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let writer = Writer::new();

    for rows in [1_000, 10_000].iter() {
        let dataset = Loader::new()
            .load_str(&generate_quality_data(*rows))
            .unwrap();
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, dataset| {
            b.iter(|| {
                let mut buf = Vec::with_capacity(dataset.row_count() * 32);
                writer.write_to(black_box(dataset), &mut buf).unwrap();
                buf
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_str, bench_load_file, bench_write);
criterion_main!(benches);
