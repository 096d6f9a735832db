//! Update Recipe Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    errors::into_status_error,
    extensions::*,
    recipes::models::{RecipeRequest, RecipeResponse},
    state::State,
};

/// Update Recipe Handler
///
/// Replaces every mutable field of the recipe.
#[endpoint(
    tags("recipes"),
    summary = "Update Recipe",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Recipe updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Recipe not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
#[tracing::instrument(
    name = "recipes.update",
    skip(recipe, json, depot),
    fields(recipe_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    recipe: PathParam<Uuid>,
    json: JsonBody<RecipeRequest>,
    depot: &mut Depot,
) -> Result<Json<RecipeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let recipe = recipe.into_inner();

    tracing::Span::current().record("recipe_uuid", tracing::field::display(recipe));

    let data = json.into_inner().into_data()?;

    let updated = state
        .app
        .recipes
        .update_recipe(caller, recipe.into(), data)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use recipes_app::domain::{
        ServiceError,
        recipes::{MockRecipesService, data::RecipeData, records::RecipeUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, authenticated_service};

    use super::{super::tests::make_recipe, *};

    fn make_service(recipes: MockRecipesService) -> Service {
        authenticated_service(
            Mocks {
                recipes,
                ..Mocks::default()
            },
            Router::with_path("recipes/{recipe}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_recipe_success() -> TestResult {
        let uuid = RecipeUuid::new();
        let mut recipe = make_recipe(uuid, "Plum Pie");

        recipe.have_made_it_myself = true;

        let expected = RecipeData {
            title: "Plum Pie".to_string(),
            have_made_it_myself: true,
            ..RecipeData::default()
        };

        let mut recipes = MockRecipesService::new();

        recipes
            .expect_update_recipe()
            .once()
            .withf(move |_, u, data| *u == uuid && *data == expected)
            .return_once(move |_, _, _| Ok(recipe));

        let mut res = TestClient::put(format!("http://example.com/recipes/{uuid}"))
            .json(&json!({ "title": "Plum Pie", "have_made_it_myself": true }))
            .send(&make_service(recipes))
            .await;

        let body: RecipeResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.title, "Plum Pie");
        assert!(body.have_made_it_myself, "update should be reflected");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_recipe_returns_404() -> TestResult {
        let mut recipes = MockRecipesService::new();

        recipes
            .expect_update_recipe()
            .once()
            .return_once(|_, _, _| Err(ServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/recipes/{}", Uuid::now_v7()))
            .json(&json!({ "title": "Plum Pie" }))
            .send(&make_service(recipes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_recipe_without_body_returns_400() -> TestResult {
        let res = TestClient::put(format!("http://example.com/recipes/{}", Uuid::now_v7()))
            .send(&make_service(MockRecipesService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
