//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, revoked, expired or malformed token.
    #[error("api token not recognised")]
    NotFound,

    #[error("api token storage failed")]
    Sql(#[from] sqlx::Error),
}
