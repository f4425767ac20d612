//! End-to-end export tests: observations → frame file → frames read back.
//!
//! Each test builds synthetic observations, exports them through
//! `export_to_path` or a `RecordingSink`, and checks the stream-level
//! ordering and content guarantees.

use proptest::prelude::*;
use tod_core::{Data, MemoryTod, Observation, SampleInterval, TodAccess};
use tod_export::{export, export_to_path, EdgePolicy, ExportConfig};
use tod_frame::{Frame, FrameReader, FrameType, Time};
use tod_test_utils::{synthetic_observation, synthetic_tod, RecordingSink, SAMPLE_RATE, T0};

// ── Helpers ─────────────────────────────────────────────────────

fn intervals(pairs: &[(usize, usize)]) -> Vec<SampleInterval> {
    pairs
        .iter()
        .map(|&(first, last)| SampleInterval::new(first, last).unwrap())
        .collect()
}

fn read_all(path: &std::path::Path) -> Vec<Frame> {
    FrameReader::open_path(path)
        .unwrap()
        .frames()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

/// Assert the stream shape: headers each followed by their own scans,
/// exactly one EndProcessing frame, and it is last.
fn assert_well_formed(frames: &[Frame]) {
    let ends = frames
        .iter()
        .filter(|f| f.frame_type() == FrameType::EndProcessing)
        .count();
    assert_eq!(ends, 1);
    assert_eq!(
        frames.last().map(|f| f.frame_type()),
        Some(FrameType::EndProcessing)
    );

    let mut current: Option<(String, i64)> = None;
    for frame in frames {
        let key = || {
            (
                frame.get_str("SourceName").unwrap().to_string(),
                frame.get_int("ObservationID").unwrap(),
            )
        };
        match frame.frame_type() {
            FrameType::Observation => current = Some(key()),
            FrameType::Scan => assert_eq!(current.as_ref(), Some(&key())),
            FrameType::EndProcessing => {}
        }
    }
}

// ── File round-trip ─────────────────────────────────────────────

#[test]
fn file_roundtrip_recovers_names_flags_and_counts() {
    let mut first = synthetic_observation(
        "CMB-field1-20230504",
        40,
        &["detA", "detB"],
        &intervals(&[(2, 5), (8, 10), (20, 30)]),
    );
    first.id = Some(42);
    let second = synthetic_observation("RCW38-7", 10, &["detA"], &[]);
    let data = Data {
        obs: vec![first, second],
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.todf");
    let stats = export_to_path(&data, &path, &ExportConfig::default()).unwrap();

    let frames = read_all(&path);
    assert_well_formed(&frames);
    assert_eq!(frames.len() as u64, stats.frames_written);
    assert_eq!(stats.observations, 2);

    let header = &frames[0];
    assert_eq!(header.frame_type(), FrameType::Observation);
    assert_eq!(header.get_str("SourceName"), Some("CMB-field1"));
    assert_eq!(header.get_int("ObservationID"), Some(20230504));
    assert_eq!(header.get_int("ToastID"), Some(42));

    // [2,6) sel, [6,8) gap, [8,11) sel, [11,20) gap, [20,31) sel
    let scans: Vec<_> = frames[1..6].iter().collect();
    assert!(scans.iter().all(|f| f.frame_type() == FrameType::Scan));
    let flags: Vec<_> = scans.iter().map(|f| f.get_bool("Selected")).collect();
    assert_eq!(flags, vec![Some(true), None, Some(true), None, Some(true)]);
    let counts: Vec<_> = scans
        .iter()
        .map(|f| f.get_timestream("BoresightAz").unwrap().len())
        .collect();
    assert_eq!(counts, vec![4, 2, 3, 9, 11]);
    for scan in &scans {
        let map = scan.get_timestream_map("total").unwrap();
        let az_len = scan.get_timestream("BoresightAz").unwrap().len();
        assert!(map.iter().all(|(_, ts)| ts.len() == az_len));
    }

    let second_header = &frames[6];
    assert_eq!(second_header.frame_type(), FrameType::Observation);
    assert_eq!(second_header.get_str("SourceName"), Some("RCW38"));
    assert!(!second_header.contains_key("ToastID"));
    assert_eq!(frames[7].frame_type(), FrameType::EndProcessing);
}

#[test]
fn detector_samples_match_cache_slice() {
    let obs = synthetic_observation("RCW38-7", 20, &["d0", "d1"], &intervals(&[(4, 9)]));
    let mut sink = RecordingSink::new();
    export(&Data { obs: vec![obs] }, &mut sink, &ExportConfig::default()).unwrap();

    let frames = sink.into_frames();
    let map = frames[1].get_timestream_map("total").unwrap();
    let d1 = map.get("d1").unwrap();
    // Fixture series for detector k is k * 1000 + i.
    let expected: Vec<f64> = (4..10).map(|i| (1000 + i) as f64).collect();
    assert_eq!(d1.samples, expected);
    assert_eq!(d1.start, Time::from_seconds(T0 + 4.0 / SAMPLE_RATE));
    assert_eq!(d1.stop, Time::from_seconds(T0 + 10.0 / SAMPLE_RATE));
}

#[test]
fn partial_local_window_clamps_both_ends() {
    // 30 samples in the observation, only [10, 20] local.
    let full = synthetic_tod(30, &["d0"], "total");
    let times = full.read_times().to_vec();
    let az = vec![0.0; 30];
    let mut tod = MemoryTod::new(times, az, (10, 20), vec!["d0".into()]).unwrap();
    tod.cache_mut().put("total_d0", vec![1.0; 30]);

    let obs = Observation {
        name: "RCW38-7".into(),
        id: None,
        detectors: vec!["d0".into()],
        intervals: intervals(&[(0, 12), (15, 25)]),
        tod: Box::new(tod),
    };
    let mut sink = RecordingSink::new();
    let stats = export(&Data { obs: vec![obs] }, &mut sink, &ExportConfig::default()).unwrap();

    // [0,13) → [10,13); gap [13,15); [15,26) → [15,20)
    let lens: Vec<_> = sink.frames()[1..]
        .iter()
        .filter(|f| f.frame_type() == FrameType::Scan)
        .map(|f| f.get_timestream("BoresightAz").unwrap().len())
        .collect();
    assert_eq!(lens, vec![3, 2, 5]);
    assert_eq!(stats.intervals_skipped, 0);
}

#[test]
fn verbose_export_still_writes_every_frame() {
    let obs = synthetic_observation("RCW38-7", 12, &["d0"], &intervals(&[(2, 5)]));
    let config = ExportConfig {
        verbose: true,
        ..ExportConfig::default()
    };
    let mut sink = RecordingSink::new();
    let stats = export(&Data { obs: vec![obs] }, &mut sink, &config).unwrap();
    assert_eq!(stats.frames_written, 3);
    assert_well_formed(sink.frames());
}

// ── Properties ──────────────────────────────────────────────────

fn arb_case() -> impl Strategy<Value = (Vec<(usize, usize)>, usize, bool)> {
    (
        prop::collection::vec((0usize..10, 1usize..10), 0..6),
        1usize..20,
        any::<bool>(),
    )
        .prop_map(|(steps, tail, cover)| {
            let mut pairs = Vec::new();
            let mut next = 0;
            for (gap, len) in steps {
                let first = next + gap;
                pairs.push((first, first + len - 1));
                next = first + len;
            }
            // Sometimes the last interval runs past the local data.
            let n_samples = (next + tail).saturating_sub(5).max(2);
            (pairs, n_samples, cover)
        })
}

proptest! {
    #[test]
    fn every_scan_has_positive_duration_within_local_samples(
        (pairs, n_samples, cover) in arb_case(),
    ) {
        let obs = synthetic_observation("RCW38-7", n_samples, &["d0"], &intervals(&pairs));
        let config = ExportConfig {
            edge_policy: if cover { EdgePolicy::Cover } else { EdgePolicy::Omit },
            ..ExportConfig::default()
        };
        let mut sink = RecordingSink::new();
        let stats = export(&Data { obs: vec![obs] }, &mut sink, &config).unwrap();

        let local_first = Time::from_seconds(T0);
        let local_last = Time::from_seconds(T0 + (n_samples - 1) as f64 / SAMPLE_RATE);
        let scans: Vec<_> = sink
            .frames()
            .iter()
            .filter(|f| f.frame_type() == FrameType::Scan)
            .collect();
        prop_assert_eq!(scans.len() as u64, stats.scans_written);

        for scan in scans {
            let az = scan.get_timestream("BoresightAz").unwrap();
            prop_assert!(az.start < az.stop);
            prop_assert!(az.start >= local_first);
            prop_assert!(az.stop <= local_last);
        }
        assert_well_formed(sink.frames());
    }
}
