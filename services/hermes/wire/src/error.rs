//! Protocol error types.

use crate::message_type::MessageType;
use thiserror::Error;

/// Protocol errors raised while validating, decoding or encoding packets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Header type nibble does not match the formatter's bound type
    #[error("invalid packet: expected a {expected} packet, header carries type code {actual}")]
    InvalidPacket {
        /// Type the formatter is bound to
        expected: MessageType,
        /// Raw type nibble found in the header
        actual: u8,
    },

    /// Message handed to a formatter bound to another type
    #[error("invalid message: expected {expected}, got {actual}")]
    InvalidMessage {
        /// Type the formatter is bound to
        expected: MessageType,
        /// Type the message reports
        actual: MessageType,
    },

    /// Header flags differ from the value the message type requires
    #[error("invalid header flag {actual} for {message_type}, expected {expected}")]
    InvalidHeaderFlag {
        /// Flags found in the header
        actual: u8,
        /// Type the flags were checked for
        message_type: MessageType,
        /// Flags the type requires
        expected: u8,
    },

    /// Requested bit window does not fit in a byte
    #[error("bit window out of range: offset {offset}, width {width}")]
    OutOfRange {
        /// Starting bit, counted from the least-significant end
        offset: u8,
        /// Number of bits
        width: u8,
    },

    /// Packet has no header byte
    #[error("empty packet")]
    EmptyPacket,

    /// Packet structure is inconsistent
    #[error("malformed packet: {0}")]
    Malformed(&'static str),

    /// Type nibble outside the protocol's value set
    #[error("unknown message type {0}")]
    UnknownMessageType(u8),

    /// No formatter is registered for the type
    #[error("no formatter registered for {0}")]
    UnsupportedMessageType(MessageType),
}

/// Result alias for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
