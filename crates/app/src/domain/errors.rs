//! Service errors shared by every entity service.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{events::BusError, pagination::ListQueryError, permissions::PermissionCheckError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record not found")]
    NotFound,

    #[error("caller lacks the required permission")]
    Forbidden,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("related resource not found")]
    InvalidReference,

    #[error("record already exists")]
    AlreadyExists,

    #[error("permission check failed")]
    Permissions(#[source] PermissionCheckError),

    #[error("message bus error")]
    Bus(#[from] BusError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ServiceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<Error> for ServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::validation("missing required data"),
            Some(ErrorKind::CheckViolation) => Self::validation("value out of range"),
            _ => Self::Sql(error),
        }
    }
}

impl From<ListQueryError> for ServiceError {
    fn from(error: ListQueryError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<PermissionCheckError> for ServiceError {
    fn from(error: PermissionCheckError) -> Self {
        Self::Permissions(error)
    }
}
