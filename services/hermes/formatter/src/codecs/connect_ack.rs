use super::checked_body;
use crate::formatter::PacketCodec;
use bytes::{BufMut, Bytes, BytesMut};
use hermes_wire::{
    encode_remaining_length, header_byte, ConnectAck, ConnectAckFlags, ConnectReturnCode,
    MessageType, ProtocolError, TypedMessage,
};

/// CONNACK codec
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectAckCodec;

impl PacketCodec for ConnectAckCodec {
    type Message = ConnectAck;

    fn read(&self, packet: &[u8]) -> Result<ConnectAck, ProtocolError> {
        self.validate_header_flag(packet, MessageType::has_fixed_flags, 0)?;

        let [flags, code] = checked_body(packet, ConnectAck::MESSAGE_TYPE)? else {
            return Err(ProtocolError::Malformed("connect ack body must be two bytes"));
        };

        let flags = ConnectAckFlags::from_bits(*flags)
            .ok_or(ProtocolError::Malformed("reserved connect ack flags"))?;
        let status = ConnectReturnCode::try_from(*code)?;

        Ok(ConnectAck::new(
            status,
            flags.contains(ConnectAckFlags::SESSION_PRESENT),
        ))
    }

    fn write(&self, message: &ConnectAck) -> Result<Bytes, ProtocolError> {
        let mut buf = BytesMut::with_capacity(4);
        buf.put_u8(header_byte(ConnectAck::MESSAGE_TYPE));
        encode_remaining_length(2, &mut buf)?;
        buf.put_u8(message.flags().bits());
        buf.put_u8(message.status as u8);
        Ok(buf.freeze())
    }
}
