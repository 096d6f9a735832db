//! Get Role Permission Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::into_status_error, extensions::*, role_permissions::models::RolePermissionResponse,
    state::State,
};

/// Get Role Permission Handler
#[endpoint(
    tags("role-permissions"),
    summary = "Get Role Permission",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    role_permission: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RolePermissionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let grant = state
        .app
        .role_permissions
        .get_role_permission(caller, role_permission.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(grant.into()))
}
