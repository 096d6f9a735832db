//! Message consumers and the host that feeds them.

mod add_to_book;

use std::{
    error::Error,
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::events::{BusError, Message, MessageBus, MessageEnvelope};

pub use add_to_book::AddToBook;

pub type ConsumerError = Box<dyn Error + Send + Sync>;

#[async_trait]
pub trait Consumer: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this consumer wants `message`.
    fn accepts(&self, message: &Message) -> bool;

    async fn consume(&self, envelope: &MessageEnvelope) -> Result<(), ConsumerError>;
}

/// Subscribes to a bus and dispatches each message to the consumers that
/// accept it.
pub struct ConsumerHost {
    bus: Arc<dyn MessageBus>,
    consumers: Vec<Arc<dyn Consumer>>,
}

impl Debug for ConsumerHost {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ConsumerHost")
            .field(
                "consumers",
                &self.consumers.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl ConsumerHost {
    #[must_use]
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self {
            bus,
            consumers: Vec::new(),
        }
    }

    #[must_use]
    pub fn register(mut self, consumer: Arc<dyn Consumer>) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Subscribe, then process messages on a spawned task until the stream ends.
    ///
    /// The subscription is in place when this returns, so messages published
    /// afterwards are not missed.
    pub async fn start(self) -> Result<JoinHandle<()>, BusError> {
        let mut stream = self.bus.subscribe().await?;

        info!(consumers = self.consumers.len(), "consumer host started");

        Ok(tokio::spawn(async move {
            while let Some(received) = stream.next().await {
                match received {
                    Ok(envelope) => self.dispatch(&envelope).await,
                    Err(error) => warn!(%error, "message bus delivered an error"),
                }
            }

            info!("consumer host stopped");
        }))
    }

    async fn dispatch(&self, envelope: &MessageEnvelope) {
        let kind = envelope.message.kind();

        for consumer in self
            .consumers
            .iter()
            .filter(|consumer| consumer.accepts(&envelope.message))
        {
            debug!(consumer = consumer.name(), kind, message_uuid = %envelope.message_uuid, "dispatching");

            if let Err(error) = consumer.consume(envelope).await {
                error!(
                    consumer = consumer.name(),
                    kind,
                    message_uuid = %envelope.message_uuid,
                    %error,
                    "consumer failed"
                );
            }
        }
    }
}
