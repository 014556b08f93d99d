use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use encoding_rs::UTF_8;
use lil_lex::frame::Table;
use lil_lex::infer::{InferOptions, infer_table};
use tempfile::TempDir;

fn generate_parcels(rows: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("parcels.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    writeln!(file, "_id,parcel_id,zip,assessed,sold_on,owner,vacant").expect("header");
    for i in 0..rows {
        let day = (i % 28) + 1;
        let vacant = if i % 2 == 0 { "true" } else { "false" };
        let owner = if i % 17 == 0 { "NA" } else { "Someone" };
        writeln!(
            file,
            "{i},{},{},{}.{:02},2021-03-{day:02},{owner},{vacant}",
            100_000 + i,
            15_200 + (i % 40),
            i * 3,
            i % 100
        )
        .expect("row");
    }
    (temp_dir, csv_path)
}

fn bench_infer(c: &mut Criterion) {
    let (temp_dir, csv_path) = generate_parcels(20_000);
    let options = InferOptions::default();
    let sampled = InferOptions {
        sample_rows: 1_000,
        ..InferOptions::default()
    };

    let mut group = c.benchmark_group("infer_columns");

    group.bench_function("full_scan", |b| {
        b.iter_batched(
            || Table::read(&csv_path, b',', UTF_8, options.sample_rows).expect("read table"),
            |table| {
                infer_table(table, &options).expect("infer full");
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("sampled_1000", |b| {
        b.iter_batched(
            || Table::read(&csv_path, b',', UTF_8, sampled.sample_rows).expect("read table"),
            |table| {
                infer_table(table, &sampled).expect("infer sampled");
            },
            BatchSize::SmallInput,
        );
    });

    drop(temp_dir);
    group.finish();
}

criterion_group!(benches, bench_infer);
criterion_main!(benches);
