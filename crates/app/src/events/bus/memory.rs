//! In-process bus for tests and single-node runs.

use async_trait::async_trait;
use tokio::sync::broadcast::{self, Sender, error::RecvError};
use tracing::debug;

use crate::events::{
    BusError, MessageEnvelope,
    bus::{EnvelopeStream, MessageBus},
};

const CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct InMemoryMessageBus {
    sender: Sender<MessageEnvelope>,
}

impl Default for InMemoryMessageBus {
    fn default() -> Self {
        let (sender, _receiver) = broadcast::channel(CAPACITY);

        Self { sender }
    }
}

#[async_trait]
impl MessageBus for InMemoryMessageBus {
    async fn publish(&self, envelope: &MessageEnvelope) -> Result<(), BusError> {
        // Sending only fails when nobody is subscribed, which is not an error here.
        if self.sender.send(envelope.clone()).is_err() {
            debug!(message_uuid = %envelope.message_uuid, "published with no subscribers");
        }

        Ok(())
    }

    async fn subscribe(&self) -> Result<EnvelopeStream, BusError> {
        let mut receiver = self.sender.subscribe();

        let stream = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(envelope) => yield Ok(envelope),
                    Err(RecvError::Lagged(skipped)) => yield Err(BusError::Lagged(skipped)),
                    Err(RecvError::Closed) => break,
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
