//! Routing of packets and messages to the formatter bound to their type.

use crate::error::FormatterError;
use crate::formatter::PacketFormatter;
use hermes_wire::{packet_type_code, Message, MessageType, ProtocolError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Formatter registry keyed by message type
#[derive(Default)]
pub struct PacketManager {
    formatters: HashMap<MessageType, Arc<dyn PacketFormatter>>,
}

impl PacketManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a formatter; one per message type
    pub fn register(&mut self, formatter: Arc<dyn PacketFormatter>) -> Result<(), FormatterError> {
        let message_type = formatter.message_type();
        if self.formatters.contains_key(&message_type) {
            return Err(FormatterError::DuplicateFormatter(message_type));
        }

        debug!(
            component = "packets",
            message_type = %message_type,
            "registered formatter"
        );
        self.formatters.insert(message_type, formatter);
        Ok(())
    }

    /// Types with a registered formatter
    pub fn message_types(&self) -> Vec<MessageType> {
        let mut types: Vec<_> = self.formatters.keys().copied().collect();
        types.sort();
        types
    }

    /// Formatter bound to `message_type`
    pub fn formatter(&self, message_type: MessageType) -> Option<&Arc<dyn PacketFormatter>> {
        self.formatters.get(&message_type)
    }

    /// Decode `packet` with the formatter its header names
    pub async fn manage_packet(&self, packet: &[u8]) -> Result<(), FormatterError> {
        let message_type = MessageType::try_from(packet_type_code(packet)?)?;
        let formatter = self.lookup(message_type)?;

        formatter.decode_and_dispatch(packet).await
    }

    /// Encode `message` with the formatter its type names
    pub async fn manage_message(&self, message: Box<dyn Message>) -> Result<(), FormatterError> {
        let formatter = self.lookup(message.message_type())?;

        formatter.encode_and_dispatch(message).await
    }

    fn lookup(&self, message_type: MessageType) -> Result<&Arc<dyn PacketFormatter>, ProtocolError> {
        self.formatters.get(&message_type).ok_or_else(|| {
            warn!(
                component = "packets",
                message_type = %message_type,
                "no formatter registered"
            );
            ProtocolError::UnsupportedMessageType(message_type)
        })
    }
}
