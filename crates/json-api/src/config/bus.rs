//! Message Bus Config

use clap::Args;
use recipes_app::events::{BusKind, BusSettings, DEFAULT_CHANNEL};

/// Message bus settings.
#[derive(Debug, Args)]
pub struct BusConfig {
    /// Bus transport (postgres, memory)
    #[arg(long, env = "BUS_KIND", default_value_t = BusKind::Postgres)]
    pub bus_kind: BusKind,

    /// Connection string for the bus; the application database is used when unset.
    #[arg(long, env = "BUS_DATABASE_URL", hide_env_values = true)]
    pub bus_database_url: Option<String>,

    /// Channel that events are published on.
    #[arg(long, env = "BUS_CHANNEL", default_value = DEFAULT_CHANNEL)]
    pub bus_channel: String,
}

impl BusConfig {
    #[must_use]
    pub fn settings(&self) -> BusSettings {
        BusSettings {
            kind: self.bus_kind,
            channel: self.bus_channel.clone(),
            database_url: self.bus_database_url.clone(),
        }
    }
}
