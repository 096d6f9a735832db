//! Get Ingredient Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::into_status_error, extensions::*, ingredients::models::IngredientResponse,
    state::State,
};

/// Get Ingredient Handler
#[endpoint(
    tags("ingredients"),
    summary = "Get Ingredient",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    ingredient: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<IngredientResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let ingredient = state
        .app
        .ingredients
        .get_ingredient(caller, ingredient.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ingredient.into()))
}
