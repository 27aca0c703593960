//! MQTT control packet types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Control packet types as carried in the upper nibble of the header byte
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageType {
    /// Client request to connect to server
    Connect = 1,
    /// Connect acknowledgment
    ConnectAck = 2,
    /// Publish message
    Publish = 3,
    /// Publish acknowledgment (QoS 1)
    PublishAck = 4,
    /// Publish received (QoS 2, part 1)
    PublishReceived = 5,
    /// Publish release (QoS 2, part 2)
    PublishRelease = 6,
    /// Publish complete (QoS 2, part 3)
    PublishComplete = 7,
    /// Client subscribe request
    Subscribe = 8,
    /// Subscribe acknowledgment
    SubscribeAck = 9,
    /// Unsubscribe request
    Unsubscribe = 10,
    /// Unsubscribe acknowledgment
    UnsubscribeAck = 11,
    /// Ping request
    PingRequest = 12,
    /// Ping response
    PingResponse = 13,
    /// Client is disconnecting
    Disconnect = 14,
}

impl MessageType {
    /// Every type, in code order
    pub const ALL: [MessageType; 14] = [
        MessageType::Connect,
        MessageType::ConnectAck,
        MessageType::Publish,
        MessageType::PublishAck,
        MessageType::PublishReceived,
        MessageType::PublishRelease,
        MessageType::PublishComplete,
        MessageType::Subscribe,
        MessageType::SubscribeAck,
        MessageType::Unsubscribe,
        MessageType::UnsubscribeAck,
        MessageType::PingRequest,
        MessageType::PingResponse,
        MessageType::Disconnect,
    ];

    /// 4-bit wire code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Type name
    pub fn name(self) -> &'static str {
        match self {
            MessageType::Connect => "Connect",
            MessageType::ConnectAck => "ConnectAck",
            MessageType::Publish => "Publish",
            MessageType::PublishAck => "PublishAck",
            MessageType::PublishReceived => "PublishReceived",
            MessageType::PublishRelease => "PublishRelease",
            MessageType::PublishComplete => "PublishComplete",
            MessageType::Subscribe => "Subscribe",
            MessageType::SubscribeAck => "SubscribeAck",
            MessageType::Unsubscribe => "Unsubscribe",
            MessageType::UnsubscribeAck => "UnsubscribeAck",
            MessageType::PingRequest => "PingRequest",
            MessageType::PingResponse => "PingResponse",
            MessageType::Disconnect => "Disconnect",
        }
    }

    /// Whether the lower header nibble is fixed for this type.
    ///
    /// Only PUBLISH carries variable flags (DUP, QoS, RETAIN).
    pub fn has_fixed_flags(self) -> bool {
        self != MessageType::Publish
    }

    /// Lower header nibble mandated for this type
    pub fn reserved_flags(self) -> u8 {
        match self {
            MessageType::PublishRelease | MessageType::Subscribe | MessageType::Unsubscribe => {
                0b0010
            }
            _ => 0b0000,
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = crate::ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageType::Connect),
            2 => Ok(MessageType::ConnectAck),
            3 => Ok(MessageType::Publish),
            4 => Ok(MessageType::PublishAck),
            5 => Ok(MessageType::PublishReceived),
            6 => Ok(MessageType::PublishRelease),
            7 => Ok(MessageType::PublishComplete),
            8 => Ok(MessageType::Subscribe),
            9 => Ok(MessageType::SubscribeAck),
            10 => Ok(MessageType::Unsubscribe),
            11 => Ok(MessageType::UnsubscribeAck),
            12 => Ok(MessageType::PingRequest),
            13 => Ok(MessageType::PingResponse),
            14 => Ok(MessageType::Disconnect),
            _ => Err(crate::ProtocolError::UnknownMessageType(value)),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_conversion() {
        assert_eq!(MessageType::try_from(1).unwrap(), MessageType::Connect);
        assert_eq!(MessageType::try_from(14).unwrap(), MessageType::Disconnect);
        assert!(MessageType::try_from(0).is_err());
        assert!(MessageType::try_from(15).is_err());
    }

    #[test]
    fn test_codes_are_unique_nibbles() {
        for (index, typ) in MessageType::ALL.iter().enumerate() {
            assert_eq!(typ.code() as usize, index + 1);
            assert!(typ.code() <= 0x0F);
            assert_eq!(MessageType::try_from(typ.code()).unwrap(), *typ);
        }
    }

    #[test]
    fn test_reserved_flags() {
        assert_eq!(MessageType::PublishRelease.reserved_flags(), 0b0010);
        assert_eq!(MessageType::PublishAck.reserved_flags(), 0);
        assert!(!MessageType::Publish.has_fixed_flags());
        assert!(MessageType::PingRequest.has_fixed_flags());
    }
}
