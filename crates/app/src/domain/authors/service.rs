//! Authors service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Caller,
    database::{Db, DeletedRows},
    domain::{
        ServiceError,
        authors::{
            data::AuthorData,
            records::{AuthorRecord, AuthorUuid},
            repository::PgAuthorsRepository,
        },
        recipes::repository::PgRecipesRepository,
    },
    pagination::{ListParameters, Page},
    permissions::{Permission, PermissionChecker, ensure_permitted},
};

#[derive(Clone)]
pub struct PgAuthorsService {
    db: Db,
    permissions: Arc<dyn PermissionChecker>,
    repository: PgAuthorsRepository,
    recipes: PgRecipesRepository,
}

impl PgAuthorsService {
    #[must_use]
    pub fn new(db: Db, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            db,
            permissions,
            repository: PgAuthorsRepository::new(),
            recipes: PgRecipesRepository::new(),
        }
    }

    /// Retrieve an author, optionally including soft-deleted rows.
    pub async fn find_author(
        &self,
        caller: &Caller,
        author: AuthorUuid,
        deleted: DeletedRows,
    ) -> Result<AuthorRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanReadAuthors).await?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.get_author(&mut tx, author, deleted).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn ensure_recipe(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &AuthorData,
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
impl AuthorsService for PgAuthorsService {
    async fn get_author(
        &self,
        caller: &Caller,
        author: AuthorUuid,
    ) -> Result<AuthorRecord, ServiceError> {
        self.find_author(caller, author, DeletedRows::Exclude).await
    }

    async fn list_authors(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<AuthorRecord>, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanReadAuthors).await?;

        let mut tx = self.db.begin().await?;

        let page = self.repository.list_authors(&mut tx, &params).await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn add_author(
        &self,
        caller: &Caller,
        data: AuthorData,
    ) -> Result<AuthorRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanAddAuthors).await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        self.ensure_recipe(&mut tx, &data).await?;

        let created = self
            .repository
            .create_author(&mut tx, AuthorUuid::new(), &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_author(
        &self,
        caller: &Caller,
        author: AuthorUuid,
        data: AuthorData,
    ) -> Result<AuthorRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanUpdateAuthors).await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        self.repository
            .get_author(&mut tx, author, DeletedRows::Exclude)
            .await?;

        self.ensure_recipe(&mut tx, &data).await?;

        let updated = self
            .repository
            .update_author(&mut tx, author, &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_author(&self, caller: &Caller, author: AuthorUuid) -> Result<(), ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanDeleteAuthors).await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_author(&mut tx, author, &caller.subject)
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
pub trait AuthorsService: Send + Sync {
    /// Retrieve a single author that has not been deleted.
    async fn get_author(
        &self,
        caller: &Caller,
        author: AuthorUuid,
    ) -> Result<AuthorRecord, ServiceError>;

    /// Retrieve a filtered, sorted page of authors.
    async fn list_authors(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<AuthorRecord>, ServiceError>;

    /// Attach a new author to an existing recipe.
    async fn add_author(
        &self,
        caller: &Caller,
        data: AuthorData,
    ) -> Result<AuthorRecord, ServiceError>;

    async fn update_author(
        &self,
        caller: &Caller,
        author: AuthorUuid,
        data: AuthorData,
    ) -> Result<AuthorRecord, ServiceError>;

    async fn delete_author(&self, caller: &Caller, author: AuthorUuid) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::recipes::{RecipesService, records::RecipeUuid},
        test::{
            TestContext,
            helpers::{create_recipe, denying_checker, unreachable_db},
        },
    };

    use super::*;

    #[tokio::test]
    async fn add_then_get_returns_the_same_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Shakshuka").await?;

        let data = AuthorData {
            recipe_uuid: recipe.uuid,
            name: "Yotam".to_string(),
        };

        let created = ctx.authors.add_author(&ctx.admin, data.clone()).await?;
        let fetched = ctx.authors.get_author(&ctx.admin, created.uuid).await?;

        assert_eq!(fetched, created);
        assert_eq!(fetched.recipe_uuid, data.recipe_uuid);
        assert_eq!(fetched.name, data.name);

        Ok(())
    }

    #[tokio::test]
    async fn add_author_for_unknown_recipe_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx
            .authors
            .add_author(
                &ctx.admin,
                AuthorData {
                    recipe_uuid: RecipeUuid::new(),
                    name: "Nobody".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_author_for_deleted_recipe_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Old Stew").await?;

        ctx.recipes.delete_recipe(&ctx.admin, recipe.uuid).await?;

        let result = ctx
            .authors
            .add_author(
                &ctx.admin,
                AuthorData {
                    recipe_uuid: recipe.uuid,
                    name: "Late".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_author_replaces_name_and_recipe() -> TestResult {
        let ctx = TestContext::new().await;
        let first = create_recipe(&ctx, "Bread").await?;
        let second = create_recipe(&ctx, "Butter").await?;

        let created = ctx
            .authors
            .add_author(
                &ctx.admin,
                AuthorData {
                    recipe_uuid: first.uuid,
                    name: "Anon".to_string(),
                },
            )
            .await?;

        let updated = ctx
            .authors
            .update_author(
                &ctx.admin,
                created.uuid,
                AuthorData {
                    recipe_uuid: second.uuid,
                    name: "Known".to_string(),
                },
            )
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.recipe_uuid, second.uuid);
        assert_eq!(updated.name, "Known");
        assert_eq!(updated.created_by, created.created_by);

        Ok(())
    }

    #[tokio::test]
    async fn update_author_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Dal").await?;

        let result = ctx
            .authors
            .update_author(
                &ctx.admin,
                AuthorUuid::new(),
                AuthorData {
                    recipe_uuid: recipe.uuid,
                    name: "Ghost".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_author_unknown_uuid_and_recipe_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .authors
            .update_author(
                &ctx.admin,
                AuthorUuid::new(),
                AuthorData {
                    recipe_uuid: RecipeUuid::new(),
                    name: "Ghost".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_author_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.authors.delete_author(&ctx.admin, AuthorUuid::new()).await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_author_is_soft() -> TestResult {
        let ctx = TestContext::new().await;
        let recipe = create_recipe(&ctx, "Curry").await?;

        let created = ctx
            .authors
            .add_author(
                &ctx.admin,
                AuthorData {
                    recipe_uuid: recipe.uuid,
                    name: "Madhur".to_string(),
                },
            )
            .await?;

        ctx.authors.delete_author(&ctx.admin, created.uuid).await?;

        let result = ctx.authors.get_author(&ctx.admin, created.uuid).await;
        let again = ctx.authors.delete_author(&ctx.admin, created.uuid).await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert!(
            matches!(again, Err(ServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        let deleted = ctx
            .authors
            .find_author(&ctx.admin, created.uuid, DeletedRows::Include)
            .await?;

        assert!(deleted.is_deleted());

        Ok(())
    }

    #[tokio::test]
    async fn list_authors_filters_by_recipe() -> TestResult {
        let ctx = TestContext::new().await;
        let soup = create_recipe(&ctx, "Soup").await?;
        let salad = create_recipe(&ctx, "Salad").await?;

        for (recipe, name) in [(soup.uuid, "Ann"), (soup.uuid, "Bea"), (salad.uuid, "Cy")] {
            ctx.authors
                .add_author(
                    &ctx.admin,
                    AuthorData {
                        recipe_uuid: recipe,
                        name: name.to_string(),
                    },
                )
                .await?;
        }

        let page = ctx
            .authors
            .list_authors(
                &ctx.admin,
                ListParameters {
                    filters: Some(format!("recipeUuid=={}", soup.uuid)),
                    sort_order: Some("-name".to_string()),
                    ..ListParameters::default()
                },
            )
            .await?;

        let names: Vec<&str> = page.items.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(page.total_count, 2);
        assert_eq!(names, vec!["Bea", "Ann"]);

        Ok(())
    }

    #[tokio::test]
    async fn forbidden_callers_never_reach_the_store() {
        let service = PgAuthorsService::new(
            unreachable_db(),
            denying_checker(Permission::CanDeleteAuthors),
        );

        let result = service
            .delete_author(&Caller::new("intruder", []), AuthorUuid::new())
            .await;

        assert!(
            matches!(result, Err(ServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }
}
