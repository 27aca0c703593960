//! Generic MQTT packet formatters with async channel dispatch.
//!
//! A formatter converts between one typed message and its wire packet. It
//! validates the header before any payload is touched, delegates the
//! per-type work to a [`PacketCodec`], and hands the result to a [`Channel`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use hermes_formatter::{FlowCodec, Formatter, MessageChannel, PacketChannel, PacketFormatter};
//! use hermes_wire::{Message, PublishAck};
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> Result<(), hermes_formatter::FormatterError> {
//! let (msg_tx, mut msg_rx) = mpsc::channel(16);
//! let (pkt_tx, _pkt_rx) = mpsc::channel(16);
//! let reader: MessageChannel = Arc::new(msg_tx);
//! let writer: PacketChannel = Arc::new(pkt_tx);
//!
//! let formatter = Formatter::new(FlowCodec::<PublishAck>::new(), reader, writer);
//! formatter.decode_and_dispatch(&[0x40, 0x02, 0x00, 0x2A]).await?;
//!
//! if let Some(message) = msg_rx.recv().await {
//!     println!("received {}", message.message_type());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod codecs;
pub mod error;
pub mod formatter;
pub mod packet_manager;

// Re-export main types
pub use channel::Channel;
pub use codecs::{ConnectAckCodec, EmptyCodec, FlowCodec};
pub use error::{ChannelError, FormatterError};
pub use formatter::{Formatter, MessageChannel, PacketChannel, PacketCodec, PacketFormatter};
pub use packet_manager::PacketManager;
