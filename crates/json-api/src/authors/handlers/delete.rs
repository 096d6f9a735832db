//! Delete Author Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::into_status_error, extensions::*, state::State};

/// Delete Author Handler
#[endpoint(
    tags("authors"),
    summary = "Delete Author",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Author deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Author not found"),
    ),
)]
pub(crate) async fn handler(
    author: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    state
        .app
        .authors
        .delete_author(caller, author.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
