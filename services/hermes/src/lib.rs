//! MQTT packet formatters for hermes.
//!
//! This crate ties the wire vocabulary ([`hermes_wire`]) and the generic
//! formatters ([`hermes_formatter`]) together with configuration and logging,
//! and wires every bundled codec into a [`PacketManager`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use hermes::{build_pipeline, HermesConfig};
//! use hermes::wire::PingRequest;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = HermesConfig::load_from_file("config.yaml")?;
//! hermes::logging::init("hermes", &config.log_level)?;
//!
//! let mut pipeline = build_pipeline(&config)?;
//! pipeline.manager.manage_message(Box::new(PingRequest)).await?;
//!
//! let packet = pipeline.packets.recv().await;
//! assert_eq!(packet.as_deref(), Some(&[0xC0, 0x00][..]));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;

pub use hermes_formatter as formatter;
pub use hermes_wire as wire;

pub use config::HermesConfig;
pub use hermes_formatter::{FormatterError, PacketManager};

use bytes::Bytes;
use hermes_formatter::{
    ConnectAckCodec, EmptyCodec, FlowCodec, Formatter, MessageChannel, PacketChannel, PacketCodec,
};
use hermes_wire::{
    Disconnect, Message, PingRequest, PingResponse, PublishAck, PublishComplete, PublishReceived,
    PublishRelease, UnsubscribeAck,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// A packet manager with every bundled formatter and the receiving ends of
/// its channels
pub struct Pipeline {
    /// Routes packets and messages to their formatter
    pub manager: PacketManager,
    /// Decoded messages
    pub messages: mpsc::Receiver<Box<dyn Message>>,
    /// Encoded packets
    pub packets: mpsc::Receiver<Bytes>,
}

/// Build a [`Pipeline`] with bounded channels sized from `config`.
///
/// Fails when `config` does not validate.
pub fn build_pipeline(config: &HermesConfig) -> anyhow::Result<Pipeline> {
    config.validate()?;

    let (msg_tx, messages) = mpsc::channel(config.inbound_capacity);
    let (pkt_tx, packets) = mpsc::channel(config.outbound_capacity);

    let manager = register_bundled(Arc::new(msg_tx), Arc::new(pkt_tx))?;
    info!(
        formatters = manager.message_types().len(),
        inbound_capacity = config.inbound_capacity,
        outbound_capacity = config.outbound_capacity,
        "packet pipeline ready"
    );

    Ok(Pipeline {
        manager,
        messages,
        packets,
    })
}

/// Register every bundled codec against the given channels
pub fn register_bundled(
    reader: MessageChannel,
    writer: PacketChannel,
) -> Result<PacketManager, FormatterError> {
    fn add<C: PacketCodec>(
        manager: &mut PacketManager,
        codec: C,
        reader: &MessageChannel,
        writer: &PacketChannel,
    ) -> Result<(), FormatterError> {
        manager.register(Arc::new(Formatter::new(
            codec,
            reader.clone(),
            writer.clone(),
        )))
    }

    let mut manager = PacketManager::new();
    add(&mut manager, ConnectAckCodec, &reader, &writer)?;
    add(&mut manager, FlowCodec::<PublishAck>::new(), &reader, &writer)?;
    add(&mut manager, FlowCodec::<PublishReceived>::new(), &reader, &writer)?;
    add(&mut manager, FlowCodec::<PublishRelease>::new(), &reader, &writer)?;
    add(&mut manager, FlowCodec::<PublishComplete>::new(), &reader, &writer)?;
    add(&mut manager, FlowCodec::<UnsubscribeAck>::new(), &reader, &writer)?;
    add(&mut manager, EmptyCodec::<PingRequest>::new(), &reader, &writer)?;
    add(&mut manager, EmptyCodec::<PingResponse>::new(), &reader, &writer)?;
    add(&mut manager, EmptyCodec::<Disconnect>::new(), &reader, &writer)?;

    Ok(manager)
}
