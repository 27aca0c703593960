//! Formatter error types.

use hermes_wire::{MessageType, ProtocolError};
use thiserror::Error;

/// Channel errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The receiving side has been dropped
    #[error("channel closed")]
    Closed,
}

/// Errors surfaced by `decode_and_dispatch` / `encode_and_dispatch`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatterError {
    /// Validation or conversion failed; nothing was sent
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The channel refused the item
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// A formatter for this type is already registered
    #[error("formatter for {0} already registered")]
    DuplicateFormatter(MessageType),
}

impl FormatterError {
    /// The protocol error, if this is one
    pub fn protocol(&self) -> Option<&ProtocolError> {
        match self {
            FormatterError::Protocol(err) => Some(err),
            FormatterError::Channel(_) | FormatterError::DuplicateFormatter(_) => None,
        }
    }
}
