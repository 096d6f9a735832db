//! Recipe Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    pagination::{PaginationResponse, add_pagination_header, list_parameters},
    recipes::models::RecipesResponse,
    state::State,
};

/// Recipe Index Handler
///
/// Returns one page of recipes matching `filters`, ordered by `sorts`.
#[endpoint(
    tags("recipes"),
    summary = "List Recipes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page of recipes"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter or sort"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    filters: QueryParam<String, false>,
    sorts: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RecipesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let recipes = state
        .app
        .recipes
        .list_recipes(caller, list_parameters(filters, sorts, page, page_size))
        .await
        .map_err(into_status_error)?;

    let pagination = PaginationResponse::from(&recipes);

    add_pagination_header(res, &pagination)?;

    Ok(Json(RecipesResponse {
        recipes: recipes.items.into_iter().map(Into::into).collect(),
        pagination,
    }))
}
