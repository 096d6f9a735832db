//! Recipes service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Caller,
    database::{Db, DeletedRows},
    domain::{
        ServiceError,
        recipes::{
            data::RecipeData,
            records::{RecipeRecord, RecipeUuid},
            repository::PgRecipesRepository,
        },
    },
    pagination::{ListParameters, Page},
    permissions::{Permission, PermissionChecker, ensure_permitted},
};

#[derive(Clone)]
pub struct PgRecipesService {
    db: Db,
    permissions: Arc<dyn PermissionChecker>,
    repository: PgRecipesRepository,
}

impl PgRecipesService {
    #[must_use]
    pub fn new(db: Db, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            db,
            permissions,
            repository: PgRecipesRepository::new(),
        }
    }

    /// Retrieve a recipe, optionally including soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no matching row exists.
    pub async fn find_recipe(
        &self,
        caller: &Caller,
        recipe: RecipeUuid,
        deleted: DeletedRows,
    ) -> Result<RecipeRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanReadRecipes).await?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.get_recipe(&mut tx, recipe, deleted).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl RecipesService for PgRecipesService {
    async fn get_recipe(
        &self,
        caller: &Caller,
        recipe: RecipeUuid,
    ) -> Result<RecipeRecord, ServiceError> {
        self.find_recipe(caller, recipe, DeletedRows::Exclude).await
    }

    async fn list_recipes(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<RecipeRecord>, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanReadRecipes).await?;

        let mut tx = self.db.begin().await?;

        let page = self.repository.list_recipes(&mut tx, &params).await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn add_recipe(
        &self,
        caller: &Caller,
        data: RecipeData,
    ) -> Result<RecipeRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanAddRecipes).await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_recipe(&mut tx, RecipeUuid::new(), &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_recipe(
        &self,
        caller: &Caller,
        recipe: RecipeUuid,
        data: RecipeData,
    ) -> Result<RecipeRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanUpdateRecipes).await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_recipe(&mut tx, recipe, &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_recipe(&self, caller: &Caller, recipe: RecipeUuid) -> Result<(), ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanDeleteRecipes).await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_recipe(&mut tx, recipe, &caller.subject)
            .await?;

        if rows_affected == 0 {
            return Err(ServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait RecipesService: Send + Sync {
    /// Retrieve a single recipe that has not been deleted.
    async fn get_recipe(
        &self,
        caller: &Caller,
        recipe: RecipeUuid,
    ) -> Result<RecipeRecord, ServiceError>;

    /// Retrieve a filtered, sorted page of recipes.
    async fn list_recipes(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<RecipeRecord>, ServiceError>;

    /// Create a recipe with a freshly generated UUID.
    async fn add_recipe(
        &self,
        caller: &Caller,
        data: RecipeData,
    ) -> Result<RecipeRecord, ServiceError>;

    /// Replace every mutable field of a recipe.
    async fn update_recipe(
        &self,
        caller: &Caller,
        recipe: RecipeUuid,
        data: RecipeData,
    ) -> Result<RecipeRecord, ServiceError>;

    /// Soft-delete a recipe.
    async fn delete_recipe(&self, caller: &Caller, recipe: RecipeUuid) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::Date;
    use testresult::TestResult;

    use crate::{
        domain::recipes::records::Visibility,
        permissions::Role,
        test::{
            TestContext,
            helpers::{create_recipe, denying_checker, recipe_data, unreachable_db},
        },
    };

    use super::*;

    #[tokio::test]
    async fn add_then_get_returns_the_same_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let data = RecipeData {
            title: "Tomato Soup".to_string(),
            visibility: Visibility::Private,
            directions: Some("Simmer for 20 minutes".to_string()),
            rating: Some(4),
            date_of_origin: Some(Date::constant(1998, 3, 14)),
            have_made_it_myself: true,
        };

        let created = ctx.recipes.add_recipe(&ctx.admin, data.clone()).await?;
        let fetched = ctx.recipes.get_recipe(&ctx.admin, created.uuid).await?;

        assert_eq!(fetched.title, data.title);
        assert_eq!(fetched.visibility, data.visibility);
        assert_eq!(fetched.directions, data.directions);
        assert_eq!(fetched.rating, data.rating);
        assert_eq!(fetched.date_of_origin, data.date_of_origin);
        assert!(fetched.have_made_it_myself);
        assert_eq!(fetched.created_by.as_deref(), Some(ctx.admin.subject.as_str()));
        assert!(!fetched.is_deleted());

        Ok(())
    }

    #[tokio::test]
    async fn get_recipe_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.recipes.get_recipe(&ctx.admin, RecipeUuid::new()).await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_recipe_with_blank_title_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx.recipes.add_recipe(&ctx.admin, recipe_data(" ")).await;

        assert!(
            matches!(result, Err(ServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_recipe_replaces_every_field() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_recipe(&ctx, "Pancakes").await?;

        let update = RecipeData {
            title: "Buttermilk Pancakes".to_string(),
            visibility: Visibility::Private,
            directions: None,
            rating: Some(5),
            date_of_origin: None,
            have_made_it_myself: true,
        };

        let updated = ctx
            .recipes
            .update_recipe(&ctx.admin, created.uuid, update.clone())
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, update.title);
        assert_eq!(updated.visibility, update.visibility);
        assert_eq!(updated.directions, None);
        assert_eq!(updated.rating, Some(5));
        assert!(updated.have_made_it_myself);

        Ok(())
    }

    #[tokio::test]
    async fn update_recipe_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .recipes
            .update_recipe(&ctx.admin, RecipeUuid::new(), recipe_data("Ghost"))
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_recipe_is_soft() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_recipe(&ctx, "Risotto").await?;

        ctx.recipes.delete_recipe(&ctx.admin, created.uuid).await?;

        let result = ctx.recipes.get_recipe(&ctx.admin, created.uuid).await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let deleted = ctx
            .recipes
            .find_recipe(&ctx.admin, created.uuid, DeletedRows::Include)
            .await?;

        assert!(deleted.is_deleted(), "row should remain with deleted_at set");

        Ok(())
    }

    #[tokio::test]
    async fn deleted_recipe_cannot_be_updated_or_deleted_again() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_recipe(&ctx, "Flan").await?;

        ctx.recipes.delete_recipe(&ctx.admin, created.uuid).await?;

        let update = ctx
            .recipes
            .update_recipe(&ctx.admin, created.uuid, recipe_data("Flan"))
            .await;
        let delete = ctx.recipes.delete_recipe(&ctx.admin, created.uuid).await;

        assert!(
            matches!(update, Err(ServiceError::NotFound)),
            "expected NotFound on update, got {update:?}"
        );
        assert!(
            matches!(delete, Err(ServiceError::NotFound)),
            "expected NotFound on second delete, got {delete:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_recipes_pages_filters_and_sorts() -> TestResult {
        let ctx = TestContext::new().await;

        for (title, rating) in [("Apple Pie", 3), ("Apple Crumble", 5), ("Banana Bread", 4)] {
            ctx.recipes
                .add_recipe(
                    &ctx.admin,
                    RecipeData {
                        rating: Some(rating),
                        ..recipe_data(title)
                    },
                )
                .await?;
        }

        let page = ctx
            .recipes
            .list_recipes(
                &ctx.admin,
                ListParameters {
                    filters: Some("title_=*apple".to_string()),
                    sort_order: Some("-rating".to_string()),
                    page_number: Some(1),
                    page_size: Some(1),
                },
            )
            .await?;

        let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(page.total_count, 2);
        assert_eq!(titles, vec!["Apple Crumble"]);
        assert!(page.has_next());

        Ok(())
    }

    #[tokio::test]
    async fn list_recipes_past_the_end_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        create_recipe(&ctx, "Gazpacho").await?;
        create_recipe(&ctx, "Paella").await?;

        let page = ctx
            .recipes
            .list_recipes(
                &ctx.admin,
                ListParameters {
                    page_number: Some(9),
                    ..ListParameters::default()
                },
            )
            .await?;

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_recipes_are_not_listed() -> TestResult {
        let ctx = TestContext::new().await;
        let kept = create_recipe(&ctx, "Lasagne").await?;
        let removed = create_recipe(&ctx, "Moussaka").await?;

        ctx.recipes.delete_recipe(&ctx.admin, removed.uuid).await?;

        let page = ctx
            .recipes
            .list_recipes(&ctx.admin, ListParameters::default())
            .await?;

        let uuids: Vec<RecipeUuid> = page.items.iter().map(|r| r.uuid).collect();

        assert_eq!(uuids, vec![kept.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_recipes_rejects_unknown_filter_fields() {
        let ctx = TestContext::new().await;

        let result = ctx
            .recipes
            .list_recipes(
                &ctx.admin,
                ListParameters {
                    filters: Some("calories>100".to_string()),
                    ..ListParameters::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn user_role_without_grant_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let reader = Caller::new("reader", [Role::user()]);

        let denied = ctx.recipes.list_recipes(&reader, ListParameters::default()).await;

        assert!(
            matches!(denied, Err(ServiceError::Forbidden)),
            "expected Forbidden, got {denied:?}"
        );

        ctx.grant(Role::user(), Permission::CanReadRecipes).await?;

        ctx.recipes
            .list_recipes(&reader, ListParameters::default())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn forbidden_callers_never_reach_the_store() {
        let service = PgRecipesService::new(
            unreachable_db(),
            denying_checker(Permission::CanAddRecipes),
        );

        let result = service
            .add_recipe(&Caller::new("intruder", []), recipe_data("Nope"))
            .await;

        assert!(
            matches!(result, Err(ServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }
}
