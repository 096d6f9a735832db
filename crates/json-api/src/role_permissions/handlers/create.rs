//! Create Role Permission Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    role_permissions::models::{RolePermissionRequest, RolePermissionResponse},
    state::State,
};

/// Create Role Permission Handler
#[endpoint(
    tags("role-permissions"),
    summary = "Grant Permission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Permission granted"),
        (status_code = StatusCode::CONFLICT, description = "Role already holds the permission"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RolePermissionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RolePermissionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let data = json.into_inner().into_data()?;

    let grant = state
        .app
        .role_permissions
        .add_role_permission(caller, data)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/role-permissions/{}", grant.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(grant.into()))
}
