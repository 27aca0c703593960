//! MQTT fixed-header bit fields, message types and typed messages.
//!
//! This crate holds the wire-level vocabulary shared by every hermes
//! formatter: bit access on the header byte, the closed set of control packet
//! types, the protocol error family, and the typed message capability.
//!
//! ## Header Byte
//!
//! ```text
//! +-----------------+-------------+-------------+
//! | bits 7..4       | bits 3..2   | bits 1..0   |
//! | message type    | flags field | reserved    |
//! +-----------------+-------------+-------------+
//! | remaining length varint (1..4 bytes)        |
//! +---------------------------------------------+
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod error;
pub mod header;
pub mod message;
pub mod message_type;

// Re-export main types
pub use bits::{bits, byte_at, high_bits, low_bits};
pub use error::{ProtocolError, Result};
pub use header::{
    decode_remaining_length, encode_remaining_length, fixed_header_len, header_byte,
    header_flags, message_type_code, packet_type_code, validate_header_flag,
    MAX_REMAINING_LENGTH,
};
pub use message::{
    narrow, ConnectAck, ConnectAckFlags, ConnectReturnCode, Disconnect, FlowMessage, Message,
    PingRequest, PingResponse, PublishAck, PublishComplete, PublishReceived, PublishRelease,
    TypedMessage, UnsubscribeAck,
};
pub use message_type::MessageType;
