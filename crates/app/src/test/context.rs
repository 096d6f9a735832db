//! Test context for service-level integration tests.

use std::sync::Arc;

use sqlx::query;
use uuid::Uuid;

use crate::{
    auth::Caller,
    database::Db,
    domain::{
        authors::PgAuthorsService, ingredients::PgIngredientsService, recipes::PgRecipesService,
        role_permissions::PgRolePermissionsService, users::PgUsersService,
    },
    permissions::{PermissionChecker, PgPermissionChecker, Permission, Role},
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,

    /// A super admin, permitted to do anything.
    pub admin: Caller,

    pub permissions: PgPermissionChecker,
    pub recipes: PgRecipesService,
    pub authors: PgAuthorsService,
    pub ingredients: PgIngredientsService,
    pub users: PgUsersService,
    pub role_permissions: PgRolePermissionsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let permissions = PgPermissionChecker::new(db.clone());
        let checker: Arc<dyn PermissionChecker> = Arc::new(permissions.clone());

        Self {
            admin: Caller::new("admin@test", [Role::super_admin()]),
            permissions,
            recipes: PgRecipesService::new(db.clone(), checker.clone()),
            authors: PgAuthorsService::new(db.clone(), checker.clone()),
            ingredients: PgIngredientsService::new(db.clone(), checker.clone()),
            users: PgUsersService::new(db.clone(), checker.clone()),
            role_permissions: PgRolePermissionsService::new(db, checker),
            db: test_db,
        }
    }

    /// Insert a grant directly, bypassing the service layer.
    pub async fn grant(&self, role: Role, permission: Permission) -> Result<(), sqlx::Error> {
        query("INSERT INTO role_permissions (uuid, role, permission) VALUES ($1, $2, $3)")
            .bind(Uuid::now_v7())
            .bind(role.as_str())
            .bind(permission.as_str())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}
