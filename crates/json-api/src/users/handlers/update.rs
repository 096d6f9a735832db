//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    errors::into_status_error,
    extensions::*,
    state::State,
    users::models::{UserRequest, UserResponse},
};

/// Update User Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::CONFLICT, description = "Identifier already in use"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let data = json.into_inner().into_data()?;

    let user = state
        .app
        .users
        .update_user(caller, user.into_inner().into(), data)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use recipes_app::domain::{ServiceError, users::MockUsersService};
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, authenticated_service};

    use super::*;

    #[tokio::test]
    async fn test_update_to_taken_identifier_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_user()
            .once()
            .withf(|_, _, data| data.identifier == "auth0|taken")
            .return_once(|_, _, _| Err(ServiceError::AlreadyExists));

        let service = authenticated_service(
            Mocks {
                users,
                ..Mocks::default()
            },
            Router::with_path("users/{user}").put(handler),
        );

        let res = TestClient::put(format!("http://example.com/users/{}", Uuid::now_v7()))
            .json(&json!({ "identifier": "auth0|taken" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
