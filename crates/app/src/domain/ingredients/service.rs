//! Ingredients service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Caller,
    database::{Db, DeletedRows},
    domain::{
        ServiceError,
        ingredients::{
            data::IngredientData,
            records::{IngredientRecord, IngredientUuid},
            repository::PgIngredientsRepository,
        },
        recipes::repository::PgRecipesRepository,
    },
    pagination::{ListParameters, Page},
    permissions::{Permission, PermissionChecker, ensure_permitted},
};

#[derive(Clone)]
pub struct PgIngredientsService {
    db: Db,
    permissions: Arc<dyn PermissionChecker>,
    repository: PgIngredientsRepository,
    recipes: PgRecipesRepository,
}

impl PgIngredientsService {
    #[must_use]
    pub fn new(db: Db, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            db,
            permissions,
            repository: PgIngredientsRepository::new(),
            recipes: PgRecipesRepository::new(),
        }
    }

    /// Retrieve an ingredient, optionally including soft-deleted rows.
    pub async fn find_ingredient(
        &self,
        caller: &Caller,
        ingredient: IngredientUuid,
        deleted: DeletedRows,
    ) -> Result<IngredientRecord, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanReadIngredients,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_ingredient(&mut tx, ingredient, deleted)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn ensure_recipe(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &IngredientData,
    ) -> Result<(), ServiceError> {
        if self.recipes.recipe_exists(tx, data.recipe_uuid).await? {
            Ok(())
        } else {
            Err(ServiceError::validation(format!(
                "recipe {} does not exist",
                data.recipe_uuid
            )))
        }
    }
}

#[async_trait]
impl IngredientsService for PgIngredientsService {
    async fn get_ingredient(
        &self,
        caller: &Caller,
        ingredient: IngredientUuid,
    ) -> Result<IngredientRecord, ServiceError> {
        self.find_ingredient(caller, ingredient, DeletedRows::Exclude)
            .await
    }

    async fn list_ingredients(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<IngredientRecord>, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanReadIngredients,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let page = self.repository.list_ingredients(&mut tx, &params).await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn add_ingredient(
        &self,
        caller: &Caller,
        data: IngredientData,
    ) -> Result<IngredientRecord, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanAddIngredients,
        )
        .await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        self.ensure_recipe(&mut tx, &data).await?;

        let created = self
            .repository
            .create_ingredient(&mut tx, IngredientUuid::new(), &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_ingredient(
        &self,
        caller: &Caller,
        ingredient: IngredientUuid,
        data: IngredientData,
    ) -> Result<IngredientRecord, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanUpdateIngredients,
        )
        .await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        self.repository
            .get_ingredient(&mut tx, ingredient, DeletedRows::Exclude)
            .await?;

        self.ensure_recipe(&mut tx, &data).await?;

        let updated = self
            .repository
            .update_ingredient(&mut tx, ingredient, &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_ingredient(
        &self,
        caller: &Caller,
        ingredient: IngredientUuid,
    ) -> Result<(), ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanDeleteIngredients,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_ingredient(&mut tx, ingredient, &caller.subject)
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
pub trait IngredientsService: Send + Sync {
    async fn get_ingredient(
        &self,
        caller: &Caller,
        ingredient: IngredientUuid,
    ) -> Result<IngredientRecord, ServiceError>;

    async fn list_ingredients(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<IngredientRecord>, ServiceError>;

    async fn add_ingredient(
        &self,
        caller: &Caller,
        data: IngredientData,
    ) -> Result<IngredientRecord, ServiceError>;

    async fn update_ingredient(
        &self,
        caller: &Caller,
        ingredient: IngredientUuid,
        data: IngredientData,
    ) -> Result<IngredientRecord, ServiceError>;

    async fn delete_ingredient(
        &self,
        caller: &Caller,
        ingredient: IngredientUuid,
    ) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::Date;
    use testresult::TestResult;

    use crate::{
        domain::recipes::records::RecipeUuid,
        test::{
            TestContext,
            helpers::{create_recipe, denying_checker, unreachable_db},
        },
    };

    use super::*;

    fn flour(recipe: RecipeUuid) -> IngredientData {
        IngredientData {
            recipe_uuid: recipe,
            name: "Flour".to_string(),
            quantity: Some("1 1/2".to_string()),
            unit_of_measure: Some("cups".to_string()),
            expires_on: Some(Date::constant(2027, 1, 31)),
        }
    }

    #[tokio::test]
    async fn add_then_get_returns_the_same_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Scones").await?;
        let data = flour(recipe.uuid);

        let created = ctx.ingredients.add_ingredient(&ctx.admin, data.clone()).await?;
        let fetched = ctx
            .ingredients
            .get_ingredient(&ctx.admin, created.uuid)
            .await?;

        assert_eq!(fetched.recipe_uuid, data.recipe_uuid);
        assert_eq!(fetched.name, data.name);
        assert_eq!(fetched.quantity, data.quantity);
        assert_eq!(fetched.unit_of_measure, data.unit_of_measure);
        assert_eq!(fetched.expires_on, data.expires_on);

        Ok(())
    }

    #[tokio::test]
    async fn add_ingredient_for_unknown_recipe_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx
            .ingredients
            .add_ingredient(&ctx.admin, flour(RecipeUuid::new()))
            .await;

        assert!(
            matches!(result, Err(ServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_ingredient_replaces_every_field() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Porridge").await?;

        let created = ctx
            .ingredients
            .add_ingredient(&ctx.admin, flour(recipe.uuid))
            .await?;

        let update = IngredientData {
            recipe_uuid: recipe.uuid,
            name: "Oats".to_string(),
            quantity: None,
            unit_of_measure: None,
            expires_on: None,
        };

        let updated = ctx
            .ingredients
            .update_ingredient(&ctx.admin, created.uuid, update.clone())
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.name, update.name);
        assert_eq!(updated.quantity, None);
        assert_eq!(updated.unit_of_measure, None);
        assert_eq!(updated.expires_on, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_ingredient_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Gumbo").await?;

        let result = ctx
            .ingredients
            .update_ingredient(&ctx.admin, IngredientUuid::new(), flour(recipe.uuid))
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_ingredient_unknown_uuid_and_recipe_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .ingredients
            .update_ingredient(&ctx.admin, IngredientUuid::new(), flour(RecipeUuid::new()))
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_ingredient_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .ingredients
            .delete_ingredient(&ctx.admin, IngredientUuid::new())
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleted_ingredient_is_hidden_but_kept() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Focaccia").await?;

        let created = ctx
            .ingredients
            .add_ingredient(&ctx.admin, flour(recipe.uuid))
            .await?;

        ctx.ingredients
            .delete_ingredient(&ctx.admin, created.uuid)
            .await?;

        let update = ctx
            .ingredients
            .update_ingredient(&ctx.admin, created.uuid, flour(recipe.uuid))
            .await;

        assert!(
            matches!(update, Err(ServiceError::NotFound)),
            "expected NotFound, got {update:?}"
        );

        let page = ctx
            .ingredients
            .list_ingredients(&ctx.admin, ListParameters::default())
            .await?;

        assert_eq!(page.total_count, 0);

        let deleted = ctx
            .ingredients
            .find_ingredient(&ctx.admin, created.uuid, DeletedRows::Include)
            .await?;

        assert!(deleted.is_deleted());

        Ok(())
    }

    #[tokio::test]
    async fn list_ingredients_filters_by_expiry() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Pantry").await?;

        for (name, expires_on) in [
            ("Milk", Date::constant(2026, 1, 10)),
            ("Eggs", Date::constant(2026, 2, 1)),
            ("Rice", Date::constant(2030, 6, 1)),
        ] {
            ctx.ingredients
                .add_ingredient(
                    &ctx.admin,
                    IngredientData {
                        name: name.to_string(),
                        expires_on: Some(expires_on),
                        ..flour(recipe.uuid)
                    },
                )
                .await?;
        }

        let page = ctx
            .ingredients
            .list_ingredients(
                &ctx.admin,
                ListParameters {
                    filters: Some("expiresOn<2027-01-01".to_string()),
                    sort_order: Some("expires_on".to_string()),
                    ..ListParameters::default()
                },
            )
            .await?;

        let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["Milk", "Eggs"]);

        Ok(())
    }

    #[tokio::test]
    async fn forbidden_callers_never_reach_the_store() {
        let service = PgIngredientsService::new(
            unreachable_db(),
            denying_checker(Permission::CanUpdateIngredients),
        );

        let result = service
            .update_ingredient(
                &Caller::new("intruder", []),
                IngredientUuid::new(),
                flour(RecipeUuid::new()),
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }
}
