//! The export loop: observations in, Observation/Scan/EndProcessing
//! frames out.

use std::path::Path;

use tod_core::{Data, Observation, ObservationName, TodAccess};
use tod_frame::{
    units, Frame, FrameSink, FrameType, FrameWriter, Time, Timestream, TimestreamMap,
    TimestreamUnits,
};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::interval::{clamp, partition, ScanInterval, SkipReason};

/// Counters describing a completed export run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Observation header frames written.
    pub observations: u64,
    /// Scan frames written.
    pub scans_written: u64,
    /// Intervals that produced no Scan frame.
    pub intervals_skipped: u64,
    /// All frames written, including the EndProcessing frame.
    pub frames_written: u64,
}

/// Export `data` to `sink` as a complete, terminated frame stream.
///
/// For each observation this writes one Observation frame, then one Scan
/// frame per selected or gap interval with local data, in sample order.
/// After the last observation an EndProcessing frame is written and the
/// sink is closed. On error the stream is left unterminated.
pub fn export(
    data: &Data,
    sink: &mut dyn FrameSink,
    config: &ExportConfig,
) -> Result<ExportStats, ExportError> {
    config.validate()?;

    let mut exporter = Exporter {
        sink,
        config,
        stats: ExportStats::default(),
    };
    for obs in data {
        exporter.export_observation(obs)?;
    }
    exporter.emit(&Frame::new(FrameType::EndProcessing))?;
    exporter.sink.close()?;

    tracing::info!(
        observations = exporter.stats.observations,
        scans = exporter.stats.scans_written,
        skipped = exporter.stats.intervals_skipped,
        "export complete"
    );
    Ok(exporter.stats)
}

/// Export `data` to a new frame file at `path`.
///
/// The file is created (or truncated) only after the configuration has
/// been validated.
pub fn export_to_path(
    data: &Data,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<ExportStats, ExportError> {
    config.validate()?;
    let mut writer = FrameWriter::create(path.as_ref())?;
    tracing::info!(path = %path.as_ref().display(), "writing frame file");
    export(data, &mut writer, config)
}

struct Exporter<'a> {
    sink: &'a mut dyn FrameSink,
    config: &'a ExportConfig,
    stats: ExportStats,
}

impl Exporter<'_> {
    fn export_observation(&mut self, obs: &Observation) -> Result<(), ExportError> {
        let name = obs.parsed_name()?;
        tracing::info!(
            observation = %obs.name,
            intervals = obs.intervals.len(),
            "exporting observation"
        );

        let mut header = Frame::new(FrameType::Observation);
        insert_name(&mut header, &name);
        if let Some(id) = obs.id {
            header.insert("ToastID", id);
        }
        self.echo(&header);
        self.emit(&header)?;
        self.stats.observations += 1;

        let tod: &dyn TodAccess = obs.tod.as_ref();
        let local = tod.local_samples();
        for interval in partition(&obs.intervals, local, self.config.edge_policy) {
            match self.scan_frame(obs, &name, interval)? {
                Ok(frame) => {
                    self.echo(&frame);
                    self.emit(&frame)?;
                    self.stats.scans_written += 1;
                }
                Err(reason) => {
                    tracing::debug!(
                        observation = %obs.name,
                        interval = %interval,
                        %reason,
                        "interval skipped"
                    );
                    self.stats.intervals_skipped += 1;
                }
            }
        }
        Ok(())
    }

    /// Build the Scan frame for one interval, or the reason there is none.
    fn scan_frame(
        &self,
        obs: &Observation,
        name: &ObservationName,
        interval: ScanInterval,
    ) -> Result<Result<Frame, SkipReason>, ExportError> {
        let tod: &dyn TodAccess = obs.tod.as_ref();
        let range = match clamp(interval, tod.local_samples()) {
            Ok(range) => range,
            Err(reason) => return Ok(Err(reason)),
        };

        let times = tod.read_times();
        let startt = Time::from_seconds(sample_at(obs, "times", times, range.start)?);
        let stopt = Time::from_seconds(sample_at(obs, "times", times, range.stop)?);
        if startt == stopt {
            return Ok(Err(SkipReason::ZeroDuration));
        }

        let mut frame = Frame::new(FrameType::Scan);
        insert_name(&mut frame, name);
        if range.selected {
            frame.insert("Selected", true);
        }

        let az = slice(obs, "boresight_az", tod.read_boresight_az(), range)?;
        let az = Timestream::new(
            az.iter().map(|v| v * units::RAD).collect(),
            TimestreamUnits::Angle,
        )
        .stamped(startt, stopt);
        frame.insert("BoresightAz", az);

        let mut map = TimestreamMap::new();
        for det in tod.local_dets() {
            let key = self.config.cache_key(det);
            let series = tod
                .cache_reference(&key)
                .ok_or_else(|| ExportError::MissingTimestream {
                    observation: obs.name.clone(),
                    key: key.clone(),
                })?;
            let samples = slice(obs, &key, series, range)?;
            let ts = Timestream::new(samples.to_vec(), self.config.detector_units)
                .stamped(startt, stopt);
            map.insert(det.clone(), ts);
        }
        frame.insert(self.config.timestreams.clone(), map);

        Ok(Ok(frame))
    }

    fn echo(&self, frame: &Frame) {
        if self.config.verbose {
            println!("{frame}");
        }
    }

    fn emit(&mut self, frame: &Frame) -> Result<(), ExportError> {
        self.sink.write_frame(frame)?;
        self.stats.frames_written += 1;
        Ok(())
    }
}

fn insert_name(frame: &mut Frame, name: &ObservationName) {
    frame.insert("SourceName", name.source.clone());
    frame.insert("ObservationID", name.id);
}

fn sample_at(
    obs: &Observation,
    series: &str,
    data: &[f64],
    index: usize,
) -> Result<f64, ExportError> {
    data.get(index)
        .copied()
        .ok_or_else(|| ExportError::SampleOutOfRange {
            observation: obs.name.clone(),
            series: series.to_string(),
            index,
            len: data.len(),
        })
}

fn slice<'d>(
    obs: &Observation,
    series: &str,
    data: &'d [f64],
    range: ScanInterval,
) -> Result<&'d [f64], ExportError> {
    data.get(range.start..range.stop)
        .ok_or_else(|| ExportError::SampleOutOfRange {
            observation: obs.name.clone(),
            series: series.to_string(),
            index: range.stop,
            len: data.len(),
        })
}
