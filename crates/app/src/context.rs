//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        authors::{AuthorsService, PgAuthorsService},
        ingredients::{IngredientsService, PgIngredientsService},
        recipes::{PgRecipesService, RecipesService},
        role_permissions::{PgRolePermissionsService, RolePermissionsService},
        users::{PgUsersService, UsersService},
    },
    events::{BusError, BusRecipeEventsService, BusSettings, MessageBus, RecipeEventsService},
    permissions::{PermissionChecker, PgPermissionChecker},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to connect to message bus")]
    Bus(#[source] BusError),
}

#[derive(Clone)]
pub struct AppContext {
    pub recipes: Arc<dyn RecipesService>,
    pub authors: Arc<dyn AuthorsService>,
    pub ingredients: Arc<dyn IngredientsService>,
    pub users: Arc<dyn UsersService>,
    pub role_permissions: Arc<dyn RolePermissionsService>,
    pub recipe_events: Arc<dyn RecipeEventsService>,
    pub auth: Arc<dyn AuthService>,

    /// Shared with consumer hosts.
    pub bus: Arc<dyn MessageBus>,
}

impl AppContext {
    /// Build application context from a database URL.
    pub async fn from_database_url(url: &str, bus: &BusSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Self::from_pool(pool, bus).await
    }

    /// Build application context over an existing pool.
    pub async fn from_pool(pool: PgPool, bus: &BusSettings) -> Result<Self, AppInitError> {
        let bus = bus.connect(&pool).await.map_err(AppInitError::Bus)?;

        let db = Db::new(pool.clone());
        let permissions: Arc<dyn PermissionChecker> =
            Arc::new(PgPermissionChecker::new(db.clone()));

        Ok(Self {
            recipes: Arc::new(PgRecipesService::new(db.clone(), permissions.clone())),
            authors: Arc::new(PgAuthorsService::new(db.clone(), permissions.clone())),
            ingredients: Arc::new(PgIngredientsService::new(db.clone(), permissions.clone())),
            users: Arc::new(PgUsersService::new(db.clone(), permissions.clone())),
            role_permissions: Arc::new(PgRolePermissionsService::new(db, permissions.clone())),
            recipe_events: Arc::new(BusRecipeEventsService::new(bus.clone(), permissions)),
            auth: Arc::new(PgAuthService::new(pool)),
            bus,
        })
    }
}
