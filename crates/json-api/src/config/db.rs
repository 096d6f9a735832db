//! Database Config

use clap::{ArgAction, Args};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Apply pending migrations on startup.
    #[arg(
        long,
        env = "DATABASE_MIGRATE",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub database_migrate: bool,

    /// Seed base role permissions on startup.
    #[arg(
        long,
        env = "DATABASE_SEED",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub database_seed: bool,
}
