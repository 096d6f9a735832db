//! Get Recipe Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::into_status_error, extensions::*, recipes::models::RecipeResponse, state::State,
};

/// Get Recipe Handler
///
/// Returns a recipe.
#[endpoint(
    tags("recipes"),
    summary = "Get Recipe",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Recipe"),
        (status_code = StatusCode::NOT_FOUND, description = "Recipe not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    recipe: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RecipeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let recipe = state
        .app
        .recipes
        .get_recipe(caller, recipe.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(recipe.into()))
}
