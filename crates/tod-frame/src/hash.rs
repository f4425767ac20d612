//! Record checksums.
//!
//! Uses FNV-1a for fast, deterministic hashing of encoded frame bodies.
//! The checksum detects truncation and bit rot; it is not cryptographically
//! secure.

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a single byte into an FNV-1a hash state.
#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Compute the checksum stored after an encoded frame body.
///
/// Returns `FNV_OFFSET` (non-zero) for an empty body.
pub fn frame_checksum(body: &[u8]) -> u64 {
    body.iter().fold(FNV_OFFSET, |hash, &b| fnv1a_byte(hash, b))
}
