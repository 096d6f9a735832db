//! Author Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    authors::models::AuthorsResponse,
    errors::into_status_error,
    extensions::*,
    pagination::{PaginationResponse, add_pagination_header, list_parameters},
    state::State,
};

/// Author Index Handler
#[endpoint(
    tags("authors"),
    summary = "List Authors",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filters: QueryParam<String, false>,
    sorts: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthorsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let authors = state
        .app
        .authors
        .list_authors(caller, list_parameters(filters, sorts, page, page_size))
        .await
        .map_err(into_status_error)?;

    let pagination = PaginationResponse::from(&authors);

    add_pagination_header(res, &pagination)?;

    Ok(Json(AuthorsResponse {
        authors: authors.items.into_iter().map(Into::into).collect(),
        pagination,
    }))
}
