//! Message bus transports.

mod memory;
mod postgres;

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
    sync::Arc,
};

use async_trait::async_trait;
use futures::stream::BoxStream;
use sqlx::PgPool;
use tracing::info;

use crate::{
    database,
    events::{BusError, MessageEnvelope},
};

pub use memory::InMemoryMessageBus;
pub use postgres::PgMessageBus;

/// Channel used when none is configured.
pub const DEFAULT_CHANNEL: &str = "recipe_management_events";

pub type EnvelopeStream = BoxStream<'static, Result<MessageEnvelope, BusError>>;

#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn publish(&self, envelope: &MessageEnvelope) -> Result<(), BusError>;

    /// Subscribe to every message published after this call returns.
    ///
    /// A transport failure is yielded once and then ends the stream.
    async fn subscribe(&self) -> Result<EnvelopeStream, BusError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusKind {
    #[default]
    Postgres,
    Memory,
}

impl Display for BusKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        })
    }
}

impl FromStr for BusKind {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(BusError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusSettings {
    pub kind: BusKind,
    pub channel: String,

    /// Separate database for the bus. The application pool is reused when unset.
    pub database_url: Option<String>,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            kind: BusKind::Postgres,
            channel: DEFAULT_CHANNEL.to_string(),
            database_url: None,
        }
    }
}

impl BusSettings {
    /// Build the configured transport.
    pub async fn connect(&self, pool: &PgPool) -> Result<Arc<dyn MessageBus>, BusError> {
        info!(kind = %self.kind, channel = %self.channel, "connecting message bus");

        match self.kind {
            BusKind::Memory => Ok(Arc::new(InMemoryMessageBus::default())),
            BusKind::Postgres => {
                let pool = match &self.database_url {
                    Some(url) => database::connect(url).await?,
                    None => pool.clone(),
                };

                Ok(Arc::new(PgMessageBus::new(pool, &self.channel)))
            }
        }
    }
}
