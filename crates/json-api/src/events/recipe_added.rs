//! Publish RecipeAdded Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::into_status_error, extensions::*, state::State};

/// Accepted publication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PublishedResponse {
    pub message_uuid: Uuid,
    pub published_at: String,
}

/// Publish a `RecipeAdded` message to the bus.
///
/// Delivery to consumers is asynchronous, so the response only confirms the
/// message was handed to the bus.
#[endpoint(
    tags("events"),
    summary = "Publish RecipeAdded",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Message published"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PublishedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let envelope = state
        .app
        .recipe_events
        .publish_recipe_added(caller)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::ACCEPTED);

    Ok(Json(PublishedResponse {
        message_uuid: envelope.message_uuid,
        published_at: envelope.published_at.to_string(),
    }))
}
