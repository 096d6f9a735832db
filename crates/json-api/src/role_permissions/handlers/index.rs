//! Role Permission Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    pagination::{PaginationResponse, add_pagination_header, list_parameters},
    role_permissions::models::RolePermissionsResponse,
    state::State,
};

/// Role Permission Index Handler
#[endpoint(
    tags("role-permissions"),
    summary = "List Role Permissions",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filters: QueryParam<String, false>,
    sorts: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RolePermissionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let grants = state
        .app
        .role_permissions
        .list_role_permissions(caller, list_parameters(filters, sorts, page, page_size))
        .await
        .map_err(into_status_error)?;

    let pagination = PaginationResponse::from(&grants);

    add_pagination_header(res, &pagination)?;

    Ok(Json(RolePermissionsResponse {
        role_permissions: grants.items.into_iter().map(Into::into).collect(),
        pagination,
    }))
}
