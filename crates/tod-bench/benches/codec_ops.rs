//! Criterion micro-benchmarks for the frame codec and record checksum.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tod_frame::codec::{decode_frame, encode_frame};
use tod_frame::{frame_checksum, Frame, FrameType, Time, Timestream, TimestreamMap, TimestreamUnits};

/// Build a Scan frame with `n_dets` detectors of `n_samples` each.
fn make_scan(n_dets: usize, n_samples: usize) -> Frame {
    let start = Time::from_seconds(1_683_158_400.0);
    let stop = Time::from_seconds(1_683_158_400.0 + n_samples as f64 / 100.0);
    let mut map = TimestreamMap::new();
    for d in 0..n_dets {
        let samples = (0..n_samples).map(|i| (d * n_samples + i) as f64).collect();
        map.insert(
            format!("det{d:03}"),
            Timestream::new(samples, TimestreamUnits::Tcmb).stamped(start, stop),
        );
    }

    let mut frame = Frame::new(FrameType::Scan);
    frame.insert("SourceName", "RCW38");
    frame.insert("ObservationID", 1000i64);
    frame.insert("Selected", true);
    frame.insert(
        "BoresightAz",
        Timestream::new(vec![0.5; n_samples], TimestreamUnits::Angle).stamped(start, stop),
    );
    frame.insert("total", map);
    frame
}

/// Benchmark: Encode a 32-detector x 1500-sample Scan frame.
fn bench_codec_encode_scan(c: &mut Criterion) {
    let frame = make_scan(32, 1_500);

    c.bench_function("codec_encode_scan", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(512 * 1024);
            encode_frame(&mut buf, &frame).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: Decode the same frame.
fn bench_codec_decode_scan(c: &mut Criterion) {
    let frame = make_scan(32, 1_500);

    let mut encoded = Vec::with_capacity(512 * 1024);
    encode_frame(&mut encoded, &frame).unwrap();

    c.bench_function("codec_decode_scan", |b| {
        b.iter(|| {
            let mut cursor = encoded.as_slice();
            let decoded = decode_frame(&mut cursor).unwrap().unwrap();
            black_box(&decoded);
        });
    });
}

/// Benchmark: Checksum a 1 MiB body.
fn bench_frame_checksum_1mib(c: &mut Criterion) {
    let body: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();

    c.bench_function("frame_checksum_1mib", |b| {
        b.iter(|| {
            let h = frame_checksum(&body);
            black_box(h);
        });
    });
}

criterion_group!(
    benches,
    bench_codec_encode_scan,
    bench_codec_decode_scan,
    bench_frame_checksum_1mib
);
criterion_main!(benches);
