//! `tod-dump`: print the frames of a TOD frame file.
//!
//! ```text
//! tod-dump obs.todf              # every frame
//! tod-dump obs.todf --summary    # frame counts per type
//! tod-dump obs.todf -n 3         # first three frames
//! ```
//!
//! Exits non-zero if the file cannot be decoded. Set `RUST_LOG` for
//! diagnostics (default `warn`).

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use tod_frame::{FrameReader, FrameType};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tod-dump",
    version,
    about = "Print the frames of a TOD frame file",
    long_about = None
)]
struct Args {
    /// Frame file to read
    file: PathBuf,

    /// Print only per-type frame counts
    #[arg(short, long)]
    summary: bool,

    /// Stop after this many frames
    #[arg(short = 'n', long)]
    max_frames: Option<u64>,
}

/// What a dump saw.
#[derive(Debug, Default, PartialEq, Eq)]
struct DumpReport {
    counts: IndexMap<FrameType, u64>,
    last_type: Option<FrameType>,
    /// Reading stopped at `--max-frames` rather than at end of stream.
    limited: bool,
}

impl DumpReport {
    fn frames(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Whether the stream was read to its end without an EndProcessing
    /// frame last.
    fn is_unterminated(&self) -> bool {
        !self.limited && self.last_type != Some(FrameType::EndProcessing)
    }
}

/// Read frames from `reader`, printing each (or, with `summary`, only the
/// per-type counts) to `out`. At most `max_frames` frames are decoded.
fn dump<R: Read>(
    reader: FrameReader<R>,
    summary: bool,
    max_frames: Option<u64>,
    out: &mut dyn Write,
) -> Result<DumpReport> {
    let mut report = DumpReport::default();
    let mut frames = reader.frames();
    loop {
        if max_frames.is_some_and(|max| frames.frames_read() >= max) {
            report.limited = true;
            break;
        }
        let Some(frame) = frames.next() else {
            break;
        };
        let frame = frame
            .with_context(|| format!("failed to decode frame {}", frames.frames_read() + 1))?;
        if !summary {
            writeln!(out, "{frame}")?;
        }
        *report.counts.entry(frame.frame_type()).or_default() += 1;
        report.last_type = Some(frame.frame_type());
    }

    if summary {
        for (frame_type, count) in &report.counts {
            writeln!(out, "{frame_type}: {count}")?;
        }
    }
    Ok(report)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let reader = FrameReader::open_path(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    let stdout = std::io::stdout();
    let report = dump(reader, args.summary, args.max_frames, &mut stdout.lock())
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    if report.is_unterminated() {
        tracing::warn!(
            file = %args.file.display(),
            frames = report.frames(),
            "stream does not end with an EndProcessing frame"
        );
    }
    Ok(())
}
