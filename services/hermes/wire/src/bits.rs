//! Bit-field access on single bytes.
//!
//! Offsets count from the least-significant end: bit 0 is `0x01`, bit 7 is
//! `0x80`. Extracted values are right-aligned.

use crate::error::{ProtocolError, Result};

/// Extract `width` contiguous bits starting at `offset`.
///
/// A zero-width window yields 0.
pub fn bits(byte: u8, width: u8, offset: u8) -> Result<u8> {
    if u16::from(width) + u16::from(offset) > 8 {
        return Err(ProtocolError::OutOfRange { offset, width });
    }

    let mask = (1u16 << width) - 1;
    Ok(((u16::from(byte) >> offset) & mask) as u8)
}

/// Extract the `width` least-significant bits
pub fn low_bits(byte: u8, width: u8) -> Result<u8> {
    bits(byte, width, 0)
}

/// Extract the `width` most-significant bits
pub fn high_bits(byte: u8, width: u8) -> Result<u8> {
    bits(byte, width, 8u8.saturating_sub(width))
}

/// Fetch the byte at `index`, reporting a missing header as an empty packet
pub fn byte_at(packet: &[u8], index: usize) -> Result<u8> {
    match packet.get(index) {
        Some(byte) => Ok(*byte),
        None if packet.is_empty() => Err(ProtocolError::EmptyPacket),
        None => Err(ProtocolError::Malformed("packet truncated")),
    }
}
