//! Service error to HTTP status mapping.

use salvo::http::StatusError;
use tracing::error;

use recipes_app::domain::ServiceError;

pub(crate) fn into_status_error(error: ServiceError) -> StatusError {
    match error {
        ServiceError::NotFound => StatusError::not_found(),
        ServiceError::Forbidden => {
            StatusError::forbidden().brief("Caller lacks the required permission")
        }
        ServiceError::Validation(message) => StatusError::bad_request().brief(message),
        ServiceError::InvalidReference => {
            StatusError::bad_request().brief("Referenced record does not exist")
        }
        ServiceError::AlreadyExists => StatusError::conflict().brief("Record already exists"),
        ServiceError::Permissions(source) => {
            error!("failed to check permissions: {source}");

            StatusError::internal_server_error()
        }
        ServiceError::Bus(source) => {
            error!("failed to publish message: {source}");

            StatusError::internal_server_error()
        }
        ServiceError::Sql(source) => {
            error!("storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
