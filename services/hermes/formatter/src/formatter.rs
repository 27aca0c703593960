//! Generic packet formatter.
//!
//! A [`Formatter`] binds one [`PacketCodec`] to an inbound message channel and
//! an outbound packet channel. It enforces the header type before the codec
//! sees a packet, and the message type before the codec sees a message; the
//! codec only supplies `read` and `write`.
//!
//! ```text
//!  packet ──► type nibble check ──► codec.read ──► message channel
//!  message ─► type + narrow ───────► codec.write ─► packet channel
//! ```

use crate::channel::Channel;
use crate::error::FormatterError;
use async_trait::async_trait;
use bytes::Bytes;
use hermes_wire::{
    narrow, packet_type_code, validate_header_flag, Message, MessageType, ProtocolError,
    TypedMessage,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Channel decoded messages are delivered to
pub type MessageChannel = Arc<dyn Channel<Box<dyn Message>>>;

/// Channel encoded packets are delivered to
pub type PacketChannel = Arc<dyn Channel<Bytes>>;

/// Per-type encode/decode routines
pub trait PacketCodec: Send + Sync + 'static {
    /// Message this codec converts; fixes the codec's message type
    type Message: TypedMessage;

    /// Decode a complete packet whose type nibble has already been checked
    fn read(&self, packet: &[u8]) -> Result<Self::Message, ProtocolError>;

    /// Encode a message into a complete packet
    fn write(&self, message: &Self::Message) -> Result<Bytes, ProtocolError>;

    /// Check the header flags field when `applies_to` holds for this codec's type
    fn validate_header_flag<P>(
        &self,
        packet: &[u8],
        applies_to: P,
        expected: u8,
    ) -> Result<(), ProtocolError>
    where
        P: Fn(MessageType) -> bool,
    {
        validate_header_flag(
            packet,
            <Self::Message as TypedMessage>::MESSAGE_TYPE,
            applies_to,
            expected,
        )
    }
}

/// Type-erased formatter, as stored by the packet manager
#[async_trait]
pub trait PacketFormatter: Send + Sync {
    /// Message type this formatter is bound to
    fn message_type(&self) -> MessageType;

    /// Validate `packet`, decode it and send the message to the inbound channel
    async fn decode_and_dispatch(&self, packet: &[u8]) -> Result<(), FormatterError>;

    /// Validate `message`, encode it and send the packet to the outbound channel
    async fn encode_and_dispatch(&self, message: Box<dyn Message>) -> Result<(), FormatterError>;
}

/// Formatter for one codec
pub struct Formatter<C: PacketCodec> {
    codec: C,
    reader: MessageChannel,
    writer: PacketChannel,
}

impl<C: PacketCodec> Formatter<C> {
    /// Create a formatter delivering into `reader` and `writer`
    pub fn new(codec: C, reader: MessageChannel, writer: PacketChannel) -> Self {
        Self {
            codec,
            reader,
            writer,
        }
    }

    /// The wrapped codec
    pub fn codec(&self) -> &C {
        &self.codec
    }
}

#[async_trait]
impl<C: PacketCodec> PacketFormatter for Formatter<C> {
    fn message_type(&self) -> MessageType {
        <C::Message as TypedMessage>::MESSAGE_TYPE
    }

    async fn decode_and_dispatch(&self, packet: &[u8]) -> Result<(), FormatterError> {
        let expected = self.message_type();
        let actual = packet_type_code(packet)?;

        if actual != expected.code() {
            warn!(
                component = "formatter",
                message_type = %expected,
                actual,
                "rejecting packet with foreign type nibble"
            );
            return Err(ProtocolError::InvalidPacket { expected, actual }.into());
        }

        let message = self.codec.read(packet)?;
        debug!(
            component = "formatter",
            message_type = %expected,
            len = packet.len(),
            "decoded packet"
        );

        self.reader.send(Box::new(message)).await?;
        Ok(())
    }

    async fn encode_and_dispatch(&self, message: Box<dyn Message>) -> Result<(), FormatterError> {
        let expected = self.message_type();
        let message = narrow::<C::Message>(message).map_err(|err| {
            warn!(
                component = "formatter",
                message_type = %expected,
                error = %err,
                "rejecting message"
            );
            err
        })?;

        let packet = self.codec.write(&message)?;
        debug!(
            component = "formatter",
            message_type = %expected,
            len = packet.len(),
            "encoded message"
        );

        self.writer.send(packet).await?;
        Ok(())
    }
}
