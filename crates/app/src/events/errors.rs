//! Message bus errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("message could not be encoded or decoded")]
    Serialize(#[from] serde_json::Error),

    #[error("bus storage error")]
    Sql(#[from] sqlx::Error),

    #[error("subscriber fell behind and skipped {0} messages")]
    Lagged(u64),

    #[error("message bus is closed")]
    Closed,

    #[error("unknown bus kind `{0}`, expected `postgres` or `memory`")]
    UnknownKind(String),
}
