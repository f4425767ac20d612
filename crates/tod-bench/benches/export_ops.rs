//! Criterion benchmarks for a full export run into memory.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tod_bench::reference_profile;
use tod_export::{export, ExportConfig};
use tod_frame::FrameWriter;

/// Benchmark: Export the reference profile to an in-memory frame stream.
fn bench_export_reference_profile(c: &mut Criterion) {
    let data = reference_profile();
    let config = ExportConfig::default();

    c.bench_function("export_reference_profile", |b| {
        b.iter(|| {
            let mut writer = FrameWriter::new(Vec::with_capacity(64 * 1024 * 1024)).unwrap();
            let stats = export(&data, &mut writer, &config).unwrap();
            black_box(stats);
            black_box(writer.into_inner());
        });
    });
}

criterion_group!(benches, bench_export_reference_profile);
criterion_main!(benches);
