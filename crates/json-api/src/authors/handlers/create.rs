//! Create Author Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    authors::models::{AuthorRequest, AuthorResponse},
    errors::into_status_error,
    extensions::*,
    state::State,
};

/// Create Author Handler
#[endpoint(
    tags("authors"),
    summary = "Create Author",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Author created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AuthorRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let author = state
        .app
        .authors
        .add_author(caller, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/authors/{}", author.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(author.into()))
}
