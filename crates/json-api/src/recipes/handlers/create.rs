//! Create Recipe Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    recipes::models::{RecipeRequest, RecipeResponse},
    state::State,
};

/// Create Recipe Handler
#[endpoint(
    tags("recipes"),
    summary = "Create Recipe",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Recipe created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RecipeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RecipeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let data = json.into_inner().into_data()?;

    let recipe = state
        .app
        .recipes
        .add_recipe(caller, data)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/recipes/{}", recipe.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(recipe.into()))
}
