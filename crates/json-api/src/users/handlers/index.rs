//! User Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::into_status_error,
    extensions::*,
    pagination::{PaginationResponse, add_pagination_header, list_parameters},
    state::State,
    users::models::UsersResponse,
};

/// User Index Handler
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filters: QueryParam<String, false>,
    sorts: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let users = state
        .app
        .users
        .list_users(caller, list_parameters(filters, sorts, page, page_size))
        .await
        .map_err(into_status_error)?;

    let pagination = PaginationResponse::from(&users);

    add_pagination_header(res, &pagination)?;

    Ok(Json(UsersResponse {
        users: users.items.into_iter().map(Into::into).collect(),
        pagination,
    }))
}

#[cfg(test)]
mod tests {
    use recipes_app::{domain::users::MockUsersService, pagination::Page};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, authenticated_service};

    use super::*;

    #[tokio::test]
    async fn test_index_page_past_the_end_is_empty() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_list_users()
            .once()
            .withf(|_, parameters| parameters.page_number == Some(9))
            .return_once(|_, _| {
                Ok(Page {
                    items: vec![],
                    total_count: 4,
                    page_number: 9,
                    page_size: 10,
                })
            });

        let service = authenticated_service(
            Mocks {
                users,
                ..Mocks::default()
            },
            Router::with_path("users").get(handler),
        );

        let body: UsersResponse = TestClient::get("http://example.com/users?page=9")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert!(body.users.is_empty(), "no users past the last page");
        assert_eq!(body.pagination.total_count, 4);
        assert!(body.pagination.has_previous, "earlier pages exist");

        Ok(())
    }
}
