//! Delete Ingredient Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::into_status_error, extensions::*, state::State};

/// Delete Ingredient Handler
#[endpoint(
    tags("ingredients"),
    summary = "Delete Ingredient",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Ingredient deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Ingredient not found"),
    ),
)]
pub(crate) async fn handler(
    ingredient: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    state
        .app
        .ingredients
        .delete_ingredient(caller, ingredient.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
