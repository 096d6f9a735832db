//! Create Ingredient Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    ingredients::models::{IngredientRequest, IngredientResponse},
    state::State,
};

/// Create Ingredient Handler
#[endpoint(
    tags("ingredients"),
    summary = "Create Ingredient",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Ingredient created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<IngredientRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<IngredientResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let data = json.into_inner().into_data()?;

    let ingredient = state
        .app
        .ingredients
        .add_ingredient(caller, data)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/ingredients/{}", ingredient.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ingredient.into()))
}
