//! Test utilities and mock types for TOD export development.
//!
//! Provides synthetic observations backed by `MemoryTod` and
//! [`FrameSink`] implementations that record or reject frames.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    synthetic_observation, synthetic_observation_with_prefix, synthetic_tod, with_constant_times,
    SAMPLE_RATE, T0,
};

use tod_frame::{Frame, FrameError, FrameSink};

/// [`FrameSink`] that keeps every frame in memory.
///
/// Mirrors the file writer's contract: frames after `close` are rejected.
#[derive(Default)]
pub struct RecordingSink {
    frames: Vec<Frame>,
    closed: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames written so far, in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl FrameSink for RecordingSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), FrameError> {
        if self.closed {
            return Err(FrameError::StreamClosed);
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<(), FrameError> {
        self.closed = true;
        Ok(())
    }
}

/// [`FrameSink`] that accepts `limit` frames and then fails every write
/// with an I/O error.
pub struct FailingSink {
    limit: usize,
    accepted: usize,
}

impl FailingSink {
    pub fn new(limit: usize) -> Self {
        Self { limit, accepted: 0 }
    }

    pub fn frames_accepted(&self) -> usize {
        self.accepted
    }
}

impl FrameSink for FailingSink {
    fn write_frame(&mut self, _frame: &Frame) -> Result<(), FrameError> {
        if self.accepted >= self.limit {
            return Err(FrameError::Io(std::io::Error::other("disk full")));
        }
        self.accepted += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), FrameError> {
        Ok(())
    }
}
