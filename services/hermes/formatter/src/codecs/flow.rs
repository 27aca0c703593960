use super::checked_body;
use crate::formatter::PacketCodec;
use bytes::{BufMut, Bytes, BytesMut};
use hermes_wire::{
    encode_remaining_length, header_byte, FlowMessage, MessageType, ProtocolError,
};
use std::marker::PhantomData;

/// Codec for packets carrying only a packet identifier
/// (PUBACK, PUBREC, PUBREL, PUBCOMP, UNSUBACK)
pub struct FlowCodec<M> {
    _message: PhantomData<fn() -> M>,
}

impl<M> FlowCodec<M> {
    /// Create the codec
    pub fn new() -> Self {
        Self {
            _message: PhantomData,
        }
    }
}

impl<M> Default for FlowCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: FlowMessage> PacketCodec for FlowCodec<M> {
    type Message = M;

    fn read(&self, packet: &[u8]) -> Result<M, ProtocolError> {
        self.validate_header_flag(packet, MessageType::has_fixed_flags, 0)?;

        match checked_body(packet, M::MESSAGE_TYPE)? {
            [hi, lo] => Ok(M::new(u16::from_be_bytes([*hi, *lo]))),
            _ => Err(ProtocolError::Malformed("expected a packet identifier only")),
        }
    }

    fn write(&self, message: &M) -> Result<Bytes, ProtocolError> {
        let mut buf = BytesMut::with_capacity(4);
        buf.put_u8(header_byte(M::MESSAGE_TYPE));
        encode_remaining_length(2, &mut buf)?;
        buf.put_u16(message.packet_id());
        Ok(buf.freeze())
    }
}
