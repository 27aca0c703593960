//! Fixed header layout.
//!
//! ```text
//!   bit  7   6   5   4   3   2   1   0
//!      +---------------+-------+-------+
//!      | message type  | flags |       |
//!      +---------------+-------+-------+
//! ```
//!
//! The type nibble occupies bits 7..4. The 2-bit flags field sits right below
//! it, at positions 4 and 5 counted from the most-significant bit. The flag
//! value a packet must carry depends on its type and is enforced by each
//! concrete codec through [`validate_header_flag`].
//!
//! The header byte is followed by the MQTT remaining-length varint.

use crate::bits::byte_at;
use crate::error::{ProtocolError, Result};
use crate::message_type::MessageType;
use bytes::{BufMut, BytesMut};
use tracing::trace;

/// Bit offset of the type nibble
pub const TYPE_OFFSET: u8 = 4;
/// Width of the type nibble
pub const TYPE_WIDTH: u8 = 4;
/// Bit offset of the flags field
pub const FLAGS_OFFSET: u8 = 2;
/// Width of the flags field
pub const FLAGS_WIDTH: u8 = 2;

/// Largest value the remaining-length varint can carry
pub const MAX_REMAINING_LENGTH: usize = 268_435_455;

const TYPE_MASK: u8 = (1 << TYPE_WIDTH) - 1;
const FLAGS_MASK: u8 = (1 << FLAGS_WIDTH) - 1;

/// Raw type nibble of a header byte
pub fn message_type_code(header: u8) -> u8 {
    (header >> TYPE_OFFSET) & TYPE_MASK
}

/// Flags field of a header byte
pub fn header_flags(header: u8) -> u8 {
    (header >> FLAGS_OFFSET) & FLAGS_MASK
}

/// Type nibble of a packet's header byte
pub fn packet_type_code(packet: &[u8]) -> Result<u8> {
    byte_at(packet, 0).map(message_type_code)
}

/// Header byte for a type, with its reserved lower nibble
pub fn header_byte(message_type: MessageType) -> u8 {
    (message_type.code() << TYPE_OFFSET) | message_type.reserved_flags()
}

/// Check the flags field of `packet` for a formatter bound to `bound_type`.
///
/// The check only applies when `applies_to(bound_type)` holds; otherwise the
/// flags are accepted as-is.
pub fn validate_header_flag<P>(
    packet: &[u8],
    bound_type: MessageType,
    applies_to: P,
    expected: u8,
) -> Result<()>
where
    P: Fn(MessageType) -> bool,
{
    let actual = header_flags(byte_at(packet, 0)?);

    if applies_to(bound_type) && actual != expected {
        return Err(ProtocolError::InvalidHeaderFlag {
            actual,
            message_type: bound_type,
            expected,
        });
    }

    Ok(())
}

/// Append the remaining-length varint for `len`
pub fn encode_remaining_length(len: usize, buf: &mut BytesMut) -> Result<()> {
    if len > MAX_REMAINING_LENGTH {
        return Err(ProtocolError::Malformed("remaining length too large"));
    }

    let mut value = len;
    loop {
        let mut digit = (value % 128) as u8;
        value /= 128;
        if value > 0 {
            digit |= 0x80;
        }
        buf.put_u8(digit);
        if value == 0 {
            break;
        }
    }

    Ok(())
}

/// Decode the remaining-length varint that follows the header byte.
///
/// Returns the decoded length and the number of bytes it occupied.
pub fn decode_remaining_length(packet: &[u8]) -> Result<(usize, usize)> {
    let mut value = 0usize;
    let mut multiplier = 1usize;

    for (index, digit) in packet.iter().skip(1).take(4).enumerate() {
        value += usize::from(digit & 0x7F) * multiplier;
        if digit & 0x80 == 0 {
            return Ok((value, index + 1));
        }
        multiplier *= 128;
    }

    if packet.len() > 4 {
        Err(ProtocolError::Malformed("remaining length exceeds four bytes"))
    } else {
        Err(ProtocolError::Malformed("remaining length truncated"))
    }
}

/// Validate that `packet` holds exactly what its remaining length announces.
///
/// Returns the offset of the variable header.
pub fn fixed_header_len(packet: &[u8]) -> Result<usize> {
    byte_at(packet, 0)?;
    let (remaining, consumed) = decode_remaining_length(packet)?;
    let header_len = 1 + consumed;

    if packet.len() != header_len + remaining {
        trace!(
            "remaining length mismatch: announced={} actual={}",
            remaining,
            packet.len() - header_len
        );
        return Err(ProtocolError::Malformed("remaining length mismatch"));
    }

    Ok(header_len)
}
