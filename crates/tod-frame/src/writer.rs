//! Frame stream writer and the sink seam producers write through.
//!
//! [`FrameWriter`] streams frames to any `Write` sink, encoding the
//! binary frame format. The header is written immediately on construction.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::codec::{encode_frame, encode_header};
use crate::error::FrameError;
use crate::types::{Frame, FrameType};

/// A sequential, exclusively owned destination for frames.
///
/// Producers depend on this trait rather than on [`FrameWriter`] so that
/// tests and alternative encoders can stand in for the file writer.
pub trait FrameSink {
    /// Append one frame to the stream.
    fn write_frame(&mut self, frame: &Frame) -> Result<(), FrameError>;

    /// Finalize the stream. No frames may be written afterwards.
    fn close(&mut self) -> Result<(), FrameError>;
}

/// Writes a frame stream to a byte sink.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`. Once an EndProcessing frame has been
/// written, or the writer closed, further frames are rejected with
/// [`FrameError::StreamClosed`].
///
/// # Examples
///
/// ```
/// use tod_frame::{Frame, FrameReader, FrameSink, FrameType, FrameWriter};
///
/// let mut buf = Vec::new();
/// let mut writer = FrameWriter::new(&mut buf).unwrap();
/// let mut obs = Frame::new(FrameType::Observation);
/// obs.insert("SourceName", "RCW38");
/// writer.write_frame(&obs).unwrap();
/// writer.write_frame(&Frame::new(FrameType::EndProcessing)).unwrap();
/// writer.close().unwrap();
/// assert_eq!(writer.frames_written(), 2);
/// drop(writer);
///
/// let mut reader = FrameReader::open(buf.as_slice()).unwrap();
/// let first = reader.next_frame().unwrap().unwrap();
/// assert_eq!(first.get_str("SourceName"), Some("RCW38"));
/// let last = reader.next_frame().unwrap().unwrap();
/// assert_eq!(last.frame_type(), FrameType::EndProcessing);
/// assert!(reader.next_frame().unwrap().is_none());
/// ```
pub struct FrameWriter<W: Write> {
    writer: W,
    frames_written: u64,
    terminated: bool,
    closed: bool,
}

impl FrameWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, FrameError> {
        let file = File::create(path.as_ref())?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> FrameWriter<W> {
    /// Create a new frame writer, immediately writing the header.
    pub fn new(mut writer: W) -> Result<Self, FrameError> {
        encode_header(&mut writer)?;
        Ok(Self {
            writer,
            frames_written: 0,
            terminated: false,
            closed: false,
        })
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), FrameError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Whether an EndProcessing frame has been written.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for FrameWriter<W> {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), FrameError> {
        if self.terminated || self.closed {
            return Err(FrameError::StreamClosed);
        }
        encode_frame(&mut self.writer, frame)?;
        self.frames_written += 1;
        if frame.frame_type() == FrameType::EndProcessing {
            self.terminated = true;
        }
        tracing::trace!(
            frame_type = %frame.frame_type(),
            entries = frame.len(),
            "frame written"
        );
        Ok(())
    }

    fn close(&mut self) -> Result<(), FrameError> {
        if !self.terminated {
            tracing::warn!(
                frames = self.frames_written,
                "closing frame stream without an EndProcessing frame"
            );
        }
        self.closed = true;
        self.flush()
    }
}
