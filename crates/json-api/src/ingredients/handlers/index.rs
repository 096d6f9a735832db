//! Ingredient Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    ingredients::models::IngredientsResponse,
    pagination::{PaginationResponse, add_pagination_header, list_parameters},
    state::State,
};

/// Ingredient Index Handler
#[endpoint(
    tags("ingredients"),
    summary = "List Ingredients",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filters: QueryParam<String, false>,
    sorts: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<IngredientsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let ingredients = state
        .app
        .ingredients
        .list_ingredients(caller, list_parameters(filters, sorts, page, page_size))
        .await
        .map_err(into_status_error)?;

    let pagination = PaginationResponse::from(&ingredients);

    add_pagination_header(res, &pagination)?;

    Ok(Json(IngredientsResponse {
        ingredients: ingredients.items.into_iter().map(Into::into).collect(),
        pagination,
    }))
}
