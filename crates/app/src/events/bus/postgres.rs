//! `PostgreSQL` `NOTIFY`/`LISTEN` transport.

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgListener, query};
use tracing::{debug, error, info, instrument};

use crate::events::{
    BusError, MessageEnvelope,
    bus::{EnvelopeStream, MessageBus},
};

#[derive(Debug, Clone)]
pub struct PgMessageBus {
    pool: PgPool,
    channel: String,
}

impl PgMessageBus {
    #[must_use]
    pub fn new(pool: PgPool, channel: &str) -> Self {
        Self {
            pool,
            channel: channel.to_string(),
        }
    }
}

#[async_trait]
impl MessageBus for PgMessageBus {
    #[instrument(skip(self, envelope), fields(message_uuid = %envelope.message_uuid))]
    async fn publish(&self, envelope: &MessageEnvelope) -> Result<(), BusError> {
        let payload = serde_json::to_string(envelope)?;

        query("SELECT pg_notify($1, $2)")
            .bind(&self.channel)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        debug!(channel = %self.channel, kind = envelope.message.kind(), "message published");

        Ok(())
    }

    async fn subscribe(&self) -> Result<EnvelopeStream, BusError> {
        let mut listener = PgListener::connect_with(&self.pool).await?;

        listener.listen(&self.channel).await?;

        info!(channel = %self.channel, "subscribed to message channel");

        let stream = async_stream::stream! {
            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        match serde_json::from_str::<MessageEnvelope>(notification.payload()) {
                            Ok(envelope) => yield Ok(envelope),
                            Err(e) => {
                                error!(error = %e, "failed to decode message");
                                yield Err(BusError::Serialize(e));
                            }
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "message listener failed");
                        yield Err(BusError::Sql(e));
                        break;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
