//! Delete Role Permission Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::into_status_error, extensions::*, state::State};

/// Delete Role Permission Handler
#[endpoint(
    tags("role-permissions"),
    summary = "Revoke Permission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Grant deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Grant not found"),
    ),
)]
pub(crate) async fn handler(
    role_permission: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    state
        .app
        .role_permissions
        .delete_role_permission(caller, role_permission.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
