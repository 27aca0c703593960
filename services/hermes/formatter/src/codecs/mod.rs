//! Bundled codecs for the fixed-size control packets.

mod connect_ack;
mod empty;
mod flow;

pub use connect_ack::ConnectAckCodec;
pub use empty::EmptyCodec;
pub use flow::FlowCodec;

use hermes_wire::{byte_at, fixed_header_len, low_bits, MessageType, ProtocolError};

/// Check the fixed header and return the bytes that follow it.
///
/// The two low header bits must match the type's reserved value; the flags
/// field above them is left to `validate_header_flag`. MQTT treats the whole
/// lower nibble as one reserved flag value, but only bits 3..2 form the flags
/// field here, so a wrong value in bits 1..0 (PUBREL sent as `0x60`) is
/// reported as `Malformed` rather than `InvalidHeaderFlag`.
fn checked_body(packet: &[u8], message_type: MessageType) -> Result<&[u8], ProtocolError> {
    let reserved = low_bits(byte_at(packet, 0)?, 2)?;
    if reserved != message_type.reserved_flags() & 0b11 {
        return Err(ProtocolError::Malformed("reserved header bits"));
    }

    let header_len = fixed_header_len(packet)?;
    Ok(&packet[header_len..])
}
