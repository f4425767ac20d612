//! Scan interval enumeration and clamping.
//!
//! Selected intervals come in as inclusive [`SampleInterval`]s. They are
//! turned into half-open [`ScanInterval`]s, the gaps between consecutive
//! selected intervals are added as unselected ranges, and the result is
//! sorted into one chronological sequence.

use std::fmt;

use tod_core::SampleInterval;

use crate::config::EdgePolicy;

/// A half-open sample range `[start, stop)` tagged selected or not.
///
/// Field order gives the derived total order: by `start`, then `stop`,
/// then `selected` (unselected first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanInterval {
    /// First sample.
    pub start: usize,
    /// One past the last sample.
    pub stop: usize,
    /// Whether this range is a selected interval rather than a gap.
    pub selected: bool,
}

impl ScanInterval {
    /// A selected range.
    pub fn selected(start: usize, stop: usize) -> Self {
        Self {
            start,
            stop,
            selected: true,
        }
    }

    /// An unselected (gap) range.
    pub fn gap(start: usize, stop: usize) -> Self {
        Self {
            start,
            stop,
            selected: false,
        }
    }

    /// Whether the range covers no samples.
    pub fn is_empty(&self) -> bool {
        self.start >= self.stop
    }
}

impl fmt::Display for ScanInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.selected { "selected" } else { "gap" };
        write!(f, "[{}, {}) {tag}", self.start, self.stop)
    }
}

/// Build the sorted sequence of selected and gap ranges.
///
/// Gaps are formed between consecutive intervals in the order given.
/// Empty or inverted gaps (from unsorted or overlapping input) are dropped.
/// With [`EdgePolicy::Cover`], the head `[local.0, earliest start)` and
/// tail `[latest stop, local.1 + 1)` are added as gaps when non-empty.
pub fn partition(
    intervals: &[SampleInterval],
    local_samples: (usize, usize),
    edges: EdgePolicy,
) -> Vec<ScanInterval> {
    let mut ranges: Vec<ScanInterval> = intervals
        .iter()
        .map(|iv| ScanInterval::selected(iv.start(), iv.stop()))
        .collect();

    ranges.extend(
        intervals
            .windows(2)
            .map(|pair| ScanInterval::gap(pair[0].stop(), pair[1].start()))
            .filter(|gap| !gap.is_empty()),
    );

    if edges == EdgePolicy::Cover {
        let earliest = intervals.iter().map(|iv| iv.start()).min();
        let latest = intervals.iter().map(|iv| iv.stop()).max();
        if let (Some(earliest), Some(latest)) = (earliest, latest) {
            let head = ScanInterval::gap(local_samples.0, earliest);
            let tail = ScanInterval::gap(latest, local_samples.1.saturating_add(1));
            ranges.extend([head, tail].into_iter().filter(|r| !r.is_empty()));
        }
    }

    ranges.sort();
    ranges
}

/// Why an interval produced no Scan frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The clamped start lies at or beyond the last local sample.
    NoLocalData,
    /// The clamped range resolves to equal start and stop times.
    ZeroDuration,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLocalData => write!(f, "no local data"),
            Self::ZeroDuration => write!(f, "zero duration"),
        }
    }
}

/// Clamp a range to the locally available samples.
///
/// Both ends are raised to at least `local.0`. A range starting at or
/// beyond `local.1` has no local data. A stop at or beyond `local.1` is
/// lowered to `local.1`, so the clamped range lies in `[local.0, local.1]`.
pub fn clamp(
    interval: ScanInterval,
    local_samples: (usize, usize),
) -> Result<ScanInterval, SkipReason> {
    let (first, last) = local_samples;
    let start = interval.start.max(first);
    let stop = interval.stop.max(first);
    if start >= last {
        return Err(SkipReason::NoLocalData);
    }
    Ok(ScanInterval {
        start,
        stop: stop.min(last),
        selected: interval.selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ivs(pairs: &[(usize, usize)]) -> Vec<SampleInterval> {
        pairs
            .iter()
            .map(|&(first, last)| SampleInterval::new(first, last).unwrap())
            .collect()
    }

    #[test]
    fn gaps_interleave_between_selected() {
        let got = partition(&ivs(&[(2, 5), (8, 10)]), (0, 12), EdgePolicy::Omit);
        assert_eq!(
            got,
            vec![
                ScanInterval::selected(2, 6),
                ScanInterval::gap(6, 8),
                ScanInterval::selected(8, 11),
            ]
        );
    }

    #[test]
    fn cover_adds_head_and_tail() {
        let got = partition(&ivs(&[(2, 5), (8, 10)]), (0, 12), EdgePolicy::Cover);
        assert_eq!(
            got,
            vec![
                ScanInterval::gap(0, 2),
                ScanInterval::selected(2, 6),
                ScanInterval::gap(6, 8),
                ScanInterval::selected(8, 11),
                ScanInterval::gap(11, 13),
            ]
        );
    }

    #[test]
    fn cover_skips_empty_edges() {
        let got = partition(&ivs(&[(0, 12)]), (0, 12), EdgePolicy::Cover);
        assert_eq!(got, vec![ScanInterval::selected(0, 13)]);
    }

    #[test]
    fn cover_edges_bound_unsorted_input() {
        let got = partition(&ivs(&[(8, 10), (2, 5)]), (0, 12), EdgePolicy::Cover);
        assert_eq!(
            got,
            vec![
                ScanInterval::gap(0, 2),
                ScanInterval::selected(2, 6),
                ScanInterval::selected(8, 11),
                ScanInterval::gap(11, 13),
            ]
        );
        assert!(got.windows(2).all(|w| w[0].stop <= w[1].start));
    }

    #[test]
    fn adjacent_intervals_produce_no_gap() {
        let got = partition(&ivs(&[(0, 3), (4, 7)]), (0, 7), EdgePolicy::Omit);
        assert_eq!(
            got,
            vec![ScanInterval::selected(0, 4), ScanInterval::selected(4, 8)]
        );
    }

    #[test]
    fn no_intervals_no_ranges() {
        assert!(partition(&[], (0, 100), EdgePolicy::Omit).is_empty());
        assert!(partition(&[], (0, 100), EdgePolicy::Cover).is_empty());
    }

    #[test]
    fn unsorted_input_is_sorted_and_inverted_gap_dropped() {
        let got = partition(&ivs(&[(8, 10), (2, 5)]), (0, 12), EdgePolicy::Omit);
        assert_eq!(
            got,
            vec![ScanInterval::selected(2, 6), ScanInterval::selected(8, 11)]
        );
    }

    #[test]
    fn order_is_start_stop_selected() {
        let mut v = vec![
            ScanInterval::selected(3, 5),
            ScanInterval::gap(3, 5),
            ScanInterval::gap(3, 4),
            ScanInterval::selected(1, 9),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                ScanInterval::selected(1, 9),
                ScanInterval::gap(3, 4),
                ScanInterval::gap(3, 5),
                ScanInterval::selected(3, 5),
            ]
        );
    }

    #[test]
    fn clamp_raises_to_local_first() {
        let got = clamp(ScanInterval::gap(0, 8), (4, 20)).unwrap();
        assert_eq!(got, ScanInterval::gap(4, 8));
    }

    #[test]
    fn clamp_lowers_stop_to_local_last() {
        let got = clamp(ScanInterval::selected(8, 11), (0, 10)).unwrap();
        assert_eq!(got, ScanInterval::selected(8, 10));
    }

    #[test]
    fn clamp_rejects_start_at_local_last() {
        assert_eq!(
            clamp(ScanInterval::selected(10, 14), (0, 10)),
            Err(SkipReason::NoLocalData)
        );
    }

    #[test]
    fn range_before_local_window_collapses() {
        // Entirely before the local window: both ends raise to local.0.
        let got = clamp(ScanInterval::gap(0, 3), (5, 20)).unwrap();
        assert_eq!(got, ScanInterval::gap(5, 5));
        assert!(got.is_empty());
    }

    fn arb_intervals() -> impl Strategy<Value = Vec<SampleInterval>> {
        prop::collection::vec((0usize..20, 1usize..20), 0..8).prop_map(|steps| {
            let mut out = Vec::new();
            let mut next = 0;
            for (gap, len) in steps {
                let first = next + gap;
                let last = first + len - 1;
                out.push(SampleInterval { first, last });
                next = last + 1;
            }
            out
        })
    }

    proptest! {
        #[test]
        fn sorted_input_partitions_into_disjoint_cover(
            intervals in arb_intervals(),
            cover in any::<bool>(),
        ) {
            let local_last = intervals.last().map_or(0, |iv| iv.last) + 5;
            let edges = if cover { EdgePolicy::Cover } else { EdgePolicy::Omit };
            let ranges = partition(&intervals, (0, local_last), edges);

            prop_assert!(ranges.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(ranges.iter().all(|r| !r.is_empty()));
            prop_assert!(ranges.windows(2).all(|w| w[0].stop == w[1].start));
            prop_assert_eq!(
                ranges.iter().filter(|r| r.selected).count(),
                intervals.len()
            );
            if let (Some(first), Some(last)) = (ranges.first(), ranges.last()) {
                if cover {
                    prop_assert_eq!(first.start, 0);
                    prop_assert_eq!(last.stop, local_last + 1);
                } else {
                    prop_assert_eq!(first.start, intervals[0].first);
                    prop_assert_eq!(last.stop, intervals[intervals.len() - 1].last + 1);
                }
            }
        }

        #[test]
        fn cover_edges_never_overlap_selected_ranges(
            intervals in arb_intervals().prop_flat_map(|v| Just(v).prop_shuffle()),
        ) {
            let local_last = intervals.iter().map(|iv| iv.last).max().unwrap_or(0) + 5;
            let ranges = partition(&intervals, (0, local_last), EdgePolicy::Cover);

            // Gaps between listed neighbours keep list order; only the
            // head and tail are checked against every selected range.
            let edges: Vec<_> = ranges
                .iter()
                .filter(|r| !r.selected && (r.start == 0 || r.stop == local_last + 1))
                .collect();
            for edge in edges {
                prop_assert!(ranges
                    .iter()
                    .filter(|r| r.selected)
                    .all(|sel| edge.stop <= sel.start || sel.stop <= edge.start));
            }
            if let (Some(first), Some(last)) = (ranges.first(), ranges.last()) {
                prop_assert_eq!(first.start, 0);
                prop_assert_eq!(last.stop, local_last + 1);
            }
        }

        #[test]
        fn clamped_ranges_stay_within_local_samples(
            start in 0usize..100,
            len in 0usize..100,
            first in 0usize..60,
            span in 0usize..60,
        ) {
            let local = (first, first + span);
            if let Ok(r) = clamp(ScanInterval::gap(start, start + len), local) {
                prop_assert!(r.start >= local.0 && r.start < local.1);
                prop_assert!(r.stop >= local.0 && r.stop <= local.1);
            }
        }
    }
}
