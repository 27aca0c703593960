use super::checked_body;
use crate::formatter::PacketCodec;
use bytes::Bytes;
use hermes_wire::{header_byte, MessageType, ProtocolError, TypedMessage};
use std::marker::PhantomData;

/// Codec for packets that are a bare fixed header (PINGREQ, PINGRESP, DISCONNECT)
pub struct EmptyCodec<M> {
    _message: PhantomData<fn() -> M>,
}

impl<M> EmptyCodec<M> {
    /// Create the codec
    pub fn new() -> Self {
        Self {
            _message: PhantomData,
        }
    }
}

impl<M> Default for EmptyCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TypedMessage + Default> PacketCodec for EmptyCodec<M> {
    type Message = M;

    fn read(&self, packet: &[u8]) -> Result<M, ProtocolError> {
        self.validate_header_flag(packet, MessageType::has_fixed_flags, 0)?;

        if !checked_body(packet, M::MESSAGE_TYPE)?.is_empty() {
            return Err(ProtocolError::Malformed("unexpected payload"));
        }

        Ok(M::default())
    }

    fn write(&self, _message: &M) -> Result<Bytes, ProtocolError> {
        Ok(Bytes::copy_from_slice(&[header_byte(M::MESSAGE_TYPE), 0x00]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_wire::{Disconnect, PingRequest, PingResponse};

    #[test]
    fn test_round_trip() {
        let codec = EmptyCodec::<PingRequest>::new();
        let packet = codec.write(&PingRequest).unwrap();
        assert_eq!(packet.as_ref(), &[0xC0, 0x00]);
        assert_eq!(codec.read(&packet).unwrap(), PingRequest);

        let codec = EmptyCodec::<PingResponse>::new();
        assert_eq!(codec.write(&PingResponse).unwrap().as_ref(), &[0xD0, 0x00]);

        let codec = EmptyCodec::<Disconnect>::new();
        assert_eq!(codec.read(&[0xE0, 0x00]).unwrap(), Disconnect);
    }

    #[test]
    fn test_rejects_payload() {
        let codec = EmptyCodec::<PingRequest>::new();
        assert_eq!(
            codec.read(&[0xC0, 0x01, 0x00]),
            Err(ProtocolError::Malformed("unexpected payload"))
        );
        assert!(codec.read(&[0xC0, 0x01]).is_err());
    }

    #[test]
    fn test_rejects_flags() {
        let codec = EmptyCodec::<Disconnect>::new();
        assert_eq!(
            codec.read(&[0xE8, 0x00]),
            Err(ProtocolError::InvalidHeaderFlag {
                actual: 0b10,
                message_type: MessageType::Disconnect,
                expected: 0,
            })
        );
        assert_eq!(
            codec.read(&[0xE1, 0x00]),
            Err(ProtocolError::Malformed("reserved header bits"))
        );
    }
}
