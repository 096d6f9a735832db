//! Get Author Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    authors::models::AuthorResponse, errors::into_status_error, extensions::*, state::State,
};

/// Get Author Handler
#[endpoint(
    tags("authors"),
    summary = "Get Author",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    author: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AuthorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let author = state
        .app
        .authors
        .get_author(caller, author.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(author.into()))
}

#[cfg(test)]
mod tests {
    use recipes_app::domain::{
        ServiceError,
        authors::{MockAuthorsService, records::AuthorUuid},
        recipes::records::RecipeUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, authenticated_service};

    use super::{super::tests::make_author, *};

    fn make_service(authors: MockAuthorsService) -> Service {
        authenticated_service(
            Mocks {
                authors,
                ..Mocks::default()
            },
            Router::with_path("authors/{author}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_author() -> TestResult {
        let uuid = AuthorUuid::new();
        let author = make_author(uuid, RecipeUuid::new());

        let mut authors = MockAuthorsService::new();

        authors
            .expect_get_author()
            .once()
            .withf(move |_, u| *u == uuid)
            .return_once(move |_, _| Ok(author));

        let body: AuthorResponse = TestClient::get(format!("http://example.com/authors/{uuid}"))
            .send(&make_service(authors))
            .await
            .take_json()
            .await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.name, "Mrs Beeton");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_forbidden_returns_403() -> TestResult {
        let mut authors = MockAuthorsService::new();

        authors
            .expect_get_author()
            .once()
            .return_once(|_, _| Err(ServiceError::Forbidden));

        let res = TestClient::get(format!("http://example.com/authors/{}", AuthorUuid::new()))
            .send(&make_service(authors))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
