//! Start-up database preparation: migrations and base data.

use sqlx::{PgPool, migrate::MigrateError, query};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    database,
    permissions::{Permission, Role},
};

const SEED_ROLE_PERMISSION_SQL: &str = include_str!("sql/seed_role_permission.sql");

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("could not connect to the database")]
    Connect(#[source] sqlx::Error),

    #[error("database migration failed")]
    Migrate(#[source] MigrateError),

    #[error("seeding base data failed")]
    Seed(#[source] sqlx::Error),
}

/// Connect to the database, logging failures.
pub async fn connect(database_url: &str) -> Result<PgPool, BootstrapError> {
    database::connect(database_url).await.map_err(|source| {
        error!(error = %source, "could not connect to the database");

        BootstrapError::Connect(source)
    })
}

/// Apply every pending migration under `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), BootstrapError> {
    info!("applying database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|source| {
            match &source {
                MigrateError::Execute(inner) => {
                    error!(error = %inner, "database unreachable while migrating");
                }
                other => error!(error = %other, "database migration failed"),
            }

            BootstrapError::Migrate(source)
        })?;

    info!("database migrations applied");

    Ok(())
}

/// Grant the `User` role every read permission. Safe to run repeatedly.
///
/// Returns the number of grants that were newly inserted.
pub async fn seed(pool: &PgPool) -> Result<u64, BootstrapError> {
    let role = Role::user();

    let mut tx = pool.begin().await.map_err(BootstrapError::Seed)?;
    let mut inserted = 0;

    for permission in Permission::READS {
        inserted += query(SEED_ROLE_PERMISSION_SQL)
            .bind(Uuid::now_v7())
            .bind(role.as_str())
            .bind(permission.as_str())
            .execute(&mut *tx)
            .await
            .map_err(BootstrapError::Seed)?
            .rows_affected();
    }

    tx.commit().await.map_err(BootstrapError::Seed)?;

    info!(inserted, role = %role, "base permissions seeded");

    Ok(inserted)
}
