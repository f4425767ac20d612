//! Binary encode/decode for the frame format.
//!
//! All integers are little-endian. Strings are length-prefixed with a
//! `u32` length. Each frame is encoded into a body buffer first so the
//! record can carry its length and checksum; no compression, no
//! alignment padding.

use std::io::{Read, Write};

use crate::error::FrameError;
use crate::hash::frame_checksum;
use crate::time::Time;
use crate::timestream::{Timestream, TimestreamMap, TimestreamUnits};
use crate::types::{Frame, FrameType, FrameValue};
use crate::{FORMAT_VERSION, MAGIC};

// ── Value type tags ─────────────────────────────────────────────

/// Value tag for [`FrameValue::Bool`].
pub const VALUE_BOOL: u8 = 0;
/// Value tag for [`FrameValue::Int`].
pub const VALUE_INT: u8 = 1;
/// Value tag for [`FrameValue::Double`].
pub const VALUE_DOUBLE: u8 = 2;
/// Value tag for [`FrameValue::String`].
pub const VALUE_STRING: u8 = 3;
/// Value tag for [`FrameValue::Time`].
pub const VALUE_TIME: u8 = 4;
/// Value tag for [`FrameValue::Timestream`].
pub const VALUE_TIMESTREAM: u8 = 5;
/// Value tag for [`FrameValue::TimestreamMap`].
pub const VALUE_TIMESTREAM_MAP: u8 = 6;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), FrameError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), FrameError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), FrameError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i64.
pub fn write_i64_le(w: &mut dyn Write, v: i64) -> Result<(), FrameError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f64.
pub fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), FrameError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a `usize` count as a u32, rejecting counts that do not fit.
fn write_count(w: &mut dyn Write, n: usize, what: &str) -> Result<(), FrameError> {
    let n = u32::try_from(n).map_err(|_| FrameError::MalformedFrame {
        detail: format!("{what} count {n} exceeds u32::MAX"),
    })?;
    write_u32_le(w, n)
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), FrameError> {
    write_count(w, s.len(), "string byte")?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, FrameError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, FrameError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, FrameError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian i64.
pub fn read_i64_le(r: &mut dyn Read) -> Result<i64, FrameError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

/// Read a little-endian f64.
pub fn read_f64_le(r: &mut dyn Read) -> Result<f64, FrameError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, FrameError> {
    let len = read_u32_le(r)? as usize;
    let mut buf = Vec::new();
    (&mut *r).take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(FrameError::MalformedFrame {
            detail: format!("truncated string: got {} of {len} bytes", buf.len()),
        });
    }
    String::from_utf8(buf).map_err(|e| FrameError::MalformedFrame {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the stream header (magic, version).
pub fn encode_header(w: &mut dyn Write) -> Result<(), FrameError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    Ok(())
}

/// Decode and validate the stream header.
pub fn decode_header(r: &mut dyn Read) -> Result<(), FrameError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(FrameError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(FrameError::UnsupportedVersion { found: version });
    }
    Ok(())
}

// ── Timestream encode/decode ────────────────────────────────────

fn encode_timestream(w: &mut dyn Write, ts: &Timestream) -> Result<(), FrameError> {
    write_i64_le(w, ts.start.ticks())?;
    write_i64_le(w, ts.stop.ticks())?;
    write_u8(w, ts.units.tag())?;
    write_count(w, ts.samples.len(), "sample")?;
    for &v in &ts.samples {
        write_f64_le(w, v)?;
    }
    Ok(())
}

fn decode_timestream(r: &mut dyn Read) -> Result<Timestream, FrameError> {
    let start = Time::from_ticks(read_i64_le(r)?);
    let stop = Time::from_ticks(read_i64_le(r)?);
    let tag = read_u8(r)?;
    let units = TimestreamUnits::from_tag(tag).ok_or(FrameError::UnknownUnits { tag })?;
    let n = read_u32_le(r)? as usize;
    // `n` is untrusted; grow as samples are actually read.
    let mut samples = Vec::new();
    for _ in 0..n {
        samples.push(read_f64_le(r)?);
    }
    Ok(Timestream {
        samples,
        units,
        start,
        stop,
    })
}

// ── Value encode/decode ─────────────────────────────────────────

fn encode_value(w: &mut dyn Write, value: &FrameValue) -> Result<(), FrameError> {
    match value {
        FrameValue::Bool(v) => {
            write_u8(w, VALUE_BOOL)?;
            write_u8(w, u8::from(*v))?;
        }
        FrameValue::Int(v) => {
            write_u8(w, VALUE_INT)?;
            write_i64_le(w, *v)?;
        }
        FrameValue::Double(v) => {
            write_u8(w, VALUE_DOUBLE)?;
            write_f64_le(w, *v)?;
        }
        FrameValue::String(s) => {
            write_u8(w, VALUE_STRING)?;
            write_length_prefixed_str(w, s)?;
        }
        FrameValue::Time(t) => {
            write_u8(w, VALUE_TIME)?;
            write_i64_le(w, t.ticks())?;
        }
        FrameValue::Timestream(ts) => {
            write_u8(w, VALUE_TIMESTREAM)?;
            encode_timestream(w, ts)?;
        }
        FrameValue::TimestreamMap(map) => {
            write_u8(w, VALUE_TIMESTREAM_MAP)?;
            write_count(w, map.len(), "timestream")?;
            for (name, ts) in map.iter() {
                write_length_prefixed_str(w, name)?;
                encode_timestream(w, ts)?;
            }
        }
    }
    Ok(())
}

fn decode_value(r: &mut dyn Read) -> Result<FrameValue, FrameError> {
    let tag = read_u8(r)?;
    let value = match tag {
        VALUE_BOOL => match read_u8(r)? {
            0 => FrameValue::Bool(false),
            1 => FrameValue::Bool(true),
            flag => {
                return Err(FrameError::MalformedFrame {
                    detail: format!("invalid bool byte: {flag}"),
                })
            }
        },
        VALUE_INT => FrameValue::Int(read_i64_le(r)?),
        VALUE_DOUBLE => FrameValue::Double(read_f64_le(r)?),
        VALUE_STRING => FrameValue::String(read_length_prefixed_str(r)?),
        VALUE_TIME => FrameValue::Time(Time::from_ticks(read_i64_le(r)?)),
        VALUE_TIMESTREAM => FrameValue::Timestream(decode_timestream(r)?),
        VALUE_TIMESTREAM_MAP => {
            let count = read_u32_le(r)? as usize;
            let mut map = TimestreamMap::new();
            for _ in 0..count {
                let name = read_length_prefixed_str(r)?;
                let ts = decode_timestream(r)?;
                if map.insert(name.clone(), ts).is_some() {
                    return Err(FrameError::MalformedFrame {
                        detail: format!("duplicate timestream '{name}'"),
                    });
                }
            }
            FrameValue::TimestreamMap(map)
        }
        tag => return Err(FrameError::UnknownValueType { tag }),
    };
    Ok(value)
}

// ── Frame body encode/decode ────────────────────────────────────

/// Encode a frame's body (type, entries) without the record envelope.
pub fn encode_frame_body(w: &mut dyn Write, frame: &Frame) -> Result<(), FrameError> {
    write_u8(w, frame.frame_type().tag())?;
    write_count(w, frame.len(), "entry")?;
    for (key, value) in frame.iter() {
        write_length_prefixed_str(w, key)?;
        encode_value(w, value)?;
    }
    Ok(())
}

/// Decode a frame body produced by [`encode_frame_body`].
///
/// The whole of `body` must be consumed; trailing bytes are an error.
pub fn decode_frame_body(body: &[u8]) -> Result<Frame, FrameError> {
    let mut r = body;
    let tag = read_u8(&mut r)?;
    let frame_type = FrameType::from_tag(tag).ok_or(FrameError::UnknownFrameType { tag })?;
    let count = read_u32_le(&mut r)? as usize;

    let mut frame = Frame::new(frame_type);
    for _ in 0..count {
        let key = read_length_prefixed_str(&mut r)?;
        let value = decode_value(&mut r)?;
        if frame.insert(key.clone(), value).is_some() {
            return Err(FrameError::MalformedFrame {
                detail: format!("duplicate key '{key}'"),
            });
        }
    }

    if !r.is_empty() {
        return Err(FrameError::MalformedFrame {
            detail: format!("{} trailing bytes after frame body", r.len()),
        });
    }
    Ok(frame)
}

// ── Record encode/decode ────────────────────────────────────────

/// Encode a frame as a complete record: length, body, checksum.
pub fn encode_frame(w: &mut dyn Write, frame: &Frame) -> Result<(), FrameError> {
    let mut body = Vec::new();
    encode_frame_body(&mut body, frame)?;
    write_count(w, body.len(), "body byte")?;
    w.write_all(&body)?;
    write_u64_le(w, frame_checksum(&body))?;
    Ok(())
}

/// Decode a single record.
///
/// Returns `Ok(None)` on clean EOF (no bytes available), `Ok(Some(frame))`
/// on success, or an error on truncated/corrupt data.
pub fn decode_frame(r: &mut dyn Read) -> Result<Option<Frame>, FrameError> {
    // Read the length prefix byte-by-byte to distinguish clean EOF
    // (zero bytes available) from truncation (1-3 bytes before EOF).
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match r.read(&mut len_buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(FrameError::MalformedFrame {
                    detail: format!("truncated record header: got {filled} of 4 bytes"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FrameError::Io(e)),
        }
    }
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut body = Vec::new();
    (&mut *r).take(len as u64).read_to_end(&mut body)?;
    if body.len() != len {
        return Err(FrameError::MalformedFrame {
            detail: format!("truncated record body: got {} of {len} bytes", body.len()),
        });
    }

    let recorded = read_u64_le(r).map_err(|e| match e {
        FrameError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            FrameError::MalformedFrame {
                detail: "truncated record checksum".into(),
            }
        }
        other => other,
    })?;
    let computed = frame_checksum(&body);
    if recorded != computed {
        return Err(FrameError::ChecksumMismatch { recorded, computed });
    }

    decode_frame_body(&body).map(Some)
}
