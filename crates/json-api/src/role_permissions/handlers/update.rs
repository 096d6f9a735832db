//! Update Role Permission Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    errors::into_status_error,
    extensions::*,
    role_permissions::models::{RolePermissionRequest, RolePermissionResponse},
    state::State,
};

/// Update Role Permission Handler
#[endpoint(
    tags("role-permissions"),
    summary = "Update Role Permission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Grant updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Grant not found"),
        (status_code = StatusCode::CONFLICT, description = "Role already holds the permission"),
    ),
)]
pub(crate) async fn handler(
    role_permission: PathParam<Uuid>,
    json: JsonBody<RolePermissionRequest>,
    depot: &mut Depot,
) -> Result<Json<RolePermissionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let data = json.into_inner().into_data()?;

    let grant = state
        .app
        .role_permissions
        .update_role_permission(caller, role_permission.into_inner().into(), data)
        .await
        .map_err(into_status_error)?;

    Ok(Json(grant.into()))
}

#[cfg(test)]
mod tests {
    use recipes_app::{
        domain::role_permissions::{MockRolePermissionsService, records::RolePermissionUuid},
        permissions::Permission,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, authenticated_service};

    use super::{super::tests::make_grant, *};

    #[tokio::test]
    async fn test_update_swaps_permission() -> TestResult {
        let uuid = RolePermissionUuid::new();
        let grant = make_grant(uuid, Permission::CanDeleteRecipes);

        let mut role_permissions = MockRolePermissionsService::new();

        role_permissions
            .expect_update_role_permission()
            .once()
            .withf(move |_, u, data| *u == uuid && data.permission == Permission::CanDeleteRecipes)
            .return_once(move |_, _, _| Ok(grant));

        let service = authenticated_service(
            Mocks {
                role_permissions,
                ..Mocks::default()
            },
            Router::with_path("role-permissions/{role_permission}").put(handler),
        );

        let body: RolePermissionResponse =
            TestClient::put(format!("http://example.com/role-permissions/{uuid}"))
                .json(&json!({ "role": "User", "permission": "CanDeleteRecipes" }))
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(body.permission, "CanDeleteRecipes");

        Ok(())
    }
}
