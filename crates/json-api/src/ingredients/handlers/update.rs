//! Update Ingredient Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    errors::into_status_error,
    extensions::*,
    ingredients::models::{IngredientRequest, IngredientResponse},
    state::State,
};

/// Update Ingredient Handler
#[endpoint(
    tags("ingredients"),
    summary = "Update Ingredient",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ingredient updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Ingredient not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    ingredient: PathParam<Uuid>,
    json: JsonBody<IngredientRequest>,
    depot: &mut Depot,
) -> Result<Json<IngredientResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let data = json.into_inner().into_data()?;

    let ingredient = state
        .app
        .ingredients
        .update_ingredient(caller, ingredient.into_inner().into(), data)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ingredient.into()))
}
