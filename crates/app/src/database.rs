//! Database connection management

use sqlx::{PgPool, Postgres, Transaction};

/// Whether soft-deleted rows take part in a read.
///
/// Default reads use [`DeletedRows::Exclude`]; `Include` is reserved for
/// auditing and tests that need to see rows after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedRows {
    #[default]
    Exclude,
    Include,
}

impl DeletedRows {
    /// Value bound to the `($n OR deleted_at IS NULL)` guard used by reads.
    #[must_use]
    pub const fn included(self) -> bool {
        matches!(self, Self::Include)
    }
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction for one service operation.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
