//! Asynchronous delivery channels.
//!
//! Formatters only ever use the send side. `send` completes once the item has
//! been accepted by the channel, not once a consumer has processed it.
//! Backpressure is whatever the underlying channel implements.

use crate::error::ChannelError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Send side of a delivery channel
#[async_trait]
pub trait Channel<T: Send + 'static>: Send + Sync {
    /// Hand `item` to the channel, waiting until it is accepted
    async fn send(&self, item: T) -> Result<(), ChannelError>;
}

#[async_trait]
impl<T: Send + 'static> Channel<T> for mpsc::Sender<T> {
    async fn send(&self, item: T) -> Result<(), ChannelError> {
        mpsc::Sender::send(self, item)
            .await
            .map_err(|_| ChannelError::Closed)
    }
}

#[async_trait]
impl<T: Send + 'static> Channel<T> for mpsc::UnboundedSender<T> {
    async fn send(&self, item: T) -> Result<(), ChannelError> {
        mpsc::UnboundedSender::send(self, item).map_err(|_| ChannelError::Closed)
    }
}
