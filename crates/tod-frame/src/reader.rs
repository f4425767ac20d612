//! Frame stream reader.
//!
//! [`FrameReader`] reads frames from any `Read` source, decoding the
//! binary frame format. The header is validated on construction.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::codec::{decode_frame, decode_header};
use crate::error::FrameError;
use crate::types::Frame;

/// Reads a frame stream from a byte source.
///
/// Generic over `R: Read` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub struct FrameReader<R: Read> {
    reader: R,
    frames_read: u64,
}

impl FrameReader<BufReader<File>> {
    /// Open the file at `path`, reading and validating the header.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, FrameError> {
        let file = File::open(path.as_ref())?;
        Self::open(BufReader::new(file))
    }
}

impl<R: Read> FrameReader<R> {
    /// Open a frame stream, reading and validating the header.
    pub fn open(mut reader: R) -> Result<Self, FrameError> {
        decode_header(&mut reader)?;
        Ok(Self {
            reader,
            frames_read: 0,
        })
    }

    /// Read the next frame, or `None` if the stream is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, FrameError> {
        let frame = decode_frame(&mut self.reader)?;
        if frame.is_some() {
            self.frames_read += 1;
        }
        Ok(frame)
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Convert into a frame iterator.
    pub fn frames(self) -> FrameIter<R> {
        FrameIter {
            reader: self.reader,
            frames_read: self.frames_read,
            done: false,
        }
    }
}

/// Iterator adapter over stream frames.
///
/// Yields each decoded frame; after the first error it yields that error
/// once and then stops.
pub struct FrameIter<R: Read> {
    reader: R,
    frames_read: u64,
    done: bool,
}

impl<R: Read> FrameIter<R> {
    /// Number of frames yielded so far, including those read before
    /// conversion from [`FrameReader`].
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl<R: Read> Iterator for FrameIter<R> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_frame(&mut self.reader) {
            Ok(Some(frame)) => {
                self.frames_read += 1;
                Some(Ok(frame))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
