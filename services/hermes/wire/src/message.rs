//! Typed messages.
//!
//! Every concrete message implements [`TypedMessage`], which fixes its
//! [`MessageType`] per type. The object-safe [`Message`] capability is what
//! travels through channels; [`narrow`] turns it back into a concrete type.

use crate::error::{ProtocolError, Result};
use crate::message_type::MessageType;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Object-safe message capability
pub trait Message: Any + fmt::Debug + Send + Sync {
    /// Type of this message
    fn message_type(&self) -> MessageType;

    /// Borrow as `Any` for inspection
    fn as_any(&self) -> &dyn Any;

    /// Convert into `Any` for narrowing
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

/// A concrete message bound to exactly one [`MessageType`]
pub trait TypedMessage: fmt::Debug + Send + Sync + Sized + 'static {
    /// Type every value of this message carries
    const MESSAGE_TYPE: MessageType;
}

impl<T: TypedMessage> Message for T {
    fn message_type(&self) -> MessageType {
        T::MESSAGE_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

impl dyn Message {
    /// Borrow as a concrete message type
    pub fn downcast_ref<T: TypedMessage>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Narrow a boxed message to `T`.
///
/// Succeeds only when the reported type is `T::MESSAGE_TYPE` and the value
/// really is a `T`; every other case is [`ProtocolError::InvalidMessage`].
pub fn narrow<T: TypedMessage>(message: Box<dyn Message>) -> Result<T> {
    let actual = message.message_type();
    if actual != T::MESSAGE_TYPE {
        return Err(ProtocolError::InvalidMessage {
            expected: T::MESSAGE_TYPE,
            actual,
        });
    }

    message
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| ProtocolError::InvalidMessage {
            expected: T::MESSAGE_TYPE,
            actual,
        })
}

macro_rules! empty_message {
    ($(#[$doc:meta])* $name:ident => $typ:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name;

        impl TypedMessage for $name {
            const MESSAGE_TYPE: MessageType = MessageType::$typ;
        }
    };
}

macro_rules! flow_message {
    ($(#[$doc:meta])* $name:ident => $typ:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            /// Packet identifier being acknowledged
            pub packet_id: u16,
        }

        impl $name {
            /// Create a message for `packet_id`
            pub fn new(packet_id: u16) -> Self {
                Self { packet_id }
            }
        }

        impl TypedMessage for $name {
            const MESSAGE_TYPE: MessageType = MessageType::$typ;
        }

        impl FlowMessage for $name {
            fn new(packet_id: u16) -> Self {
                Self { packet_id }
            }

            fn packet_id(&self) -> u16 {
                self.packet_id
            }
        }
    };
}

/// Messages made of a packet identifier only
pub trait FlowMessage: TypedMessage {
    /// Create a message for `packet_id`
    fn new(packet_id: u16) -> Self;

    /// Packet identifier
    fn packet_id(&self) -> u16;
}

empty_message!(
    /// PINGREQ
    PingRequest => PingRequest
);
empty_message!(
    /// PINGRESP
    PingResponse => PingResponse
);
empty_message!(
    /// DISCONNECT
    Disconnect => Disconnect
);

flow_message!(
    /// PUBACK
    PublishAck => PublishAck
);
flow_message!(
    /// PUBREC
    PublishReceived => PublishReceived
);
flow_message!(
    /// PUBREL
    PublishRelease => PublishRelease
);
flow_message!(
    /// PUBCOMP
    PublishComplete => PublishComplete
);
flow_message!(
    /// UNSUBACK
    UnsubscribeAck => UnsubscribeAck
);

bitflags! {
    /// Connect acknowledge flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ConnectAckFlags: u8 {
        /// Server holds a session for this client
        const SESSION_PRESENT = 1 << 0;
    }
}

/// CONNACK return codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectReturnCode {
    /// Connection accepted
    Accepted = 0x00,
    /// Unacceptable protocol version
    UnacceptableProtocolVersion = 0x01,
    /// Identifier rejected
    IdentifierRejected = 0x02,
    /// Server unavailable
    ServerUnavailable = 0x03,
    /// Bad user name or password
    BadCredentials = 0x04,
    /// Not authorized
    NotAuthorized = 0x05,
}

impl TryFrom<u8> for ConnectReturnCode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(ConnectReturnCode::Accepted),
            0x01 => Ok(ConnectReturnCode::UnacceptableProtocolVersion),
            0x02 => Ok(ConnectReturnCode::IdentifierRejected),
            0x03 => Ok(ConnectReturnCode::ServerUnavailable),
            0x04 => Ok(ConnectReturnCode::BadCredentials),
            0x05 => Ok(ConnectReturnCode::NotAuthorized),
            _ => Err(ProtocolError::Malformed("unknown connect return code")),
        }
    }
}

/// CONNACK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectAck {
    /// Return code
    pub status: ConnectReturnCode,
    /// Server holds a session for this client
    pub session_present: bool,
}

impl ConnectAck {
    /// Create a CONNACK
    pub fn new(status: ConnectReturnCode, session_present: bool) -> Self {
        Self {
            status,
            session_present,
        }
    }

    /// Acknowledge flags as sent on the wire
    pub fn flags(&self) -> ConnectAckFlags {
        if self.session_present {
            ConnectAckFlags::SESSION_PRESENT
        } else {
            ConnectAckFlags::empty()
        }
    }
}

impl TypedMessage for ConnectAck {
    const MESSAGE_TYPE: MessageType = MessageType::ConnectAck;
}
