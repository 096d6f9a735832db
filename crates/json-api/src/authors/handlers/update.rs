//! Update Author Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    authors::models::{AuthorRequest, AuthorResponse},
    errors::into_status_error,
    extensions::*,
    state::State,
};

/// Update Author Handler
#[endpoint(
    tags("authors"),
    summary = "Update Author",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Author updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Author not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    author: PathParam<Uuid>,
    json: JsonBody<AuthorRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let author = state
        .app
        .authors
        .update_author(caller, author.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(author.into()))
}
