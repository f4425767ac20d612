//! The accessor trait the exporter reads observations through.

/// Read-only access to one observation's time-ordered data.
///
/// All per-sample series are indexed by observation sample index. Only the
/// range reported by [`local_samples`](Self::local_samples) is guaranteed
/// to hold data on this process.
pub trait TodAccess {
    /// Per-sample UNIX time in seconds.
    fn read_times(&self) -> &[f64];

    /// Boresight azimuth in radians.
    fn read_boresight_az(&self) -> &[f64];

    /// Ascending bounds `(first, last)` of the locally available samples.
    fn local_samples(&self) -> (usize, usize);

    /// Detectors whose data is held locally.
    fn local_dets(&self) -> &[String];

    /// Look up a named cached series, e.g. `"total_detA"`.
    ///
    /// Returns `None` if no series is cached under `name`.
    fn cache_reference(&self, name: &str) -> Option<&[f64]>;
}
