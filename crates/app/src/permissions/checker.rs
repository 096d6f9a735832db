//! Permission checker client.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use thiserror::Error;

use crate::{
    auth::Caller,
    database::Db,
    permissions::{Permission, Role, RoleGrant, is_permitted},
};

const LIST_GRANTS_FOR_ROLES_SQL: &str = include_str!("sql/list_grants_for_roles.sql");

#[derive(Debug, Error)]
pub enum PermissionCheckError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

#[automock]
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// Whether `caller` holds `permission`.
    async fn has_permission(
        &self,
        caller: &Caller,
        permission: Permission,
    ) -> Result<bool, PermissionCheckError>;
}

/// Checks permissions against the `role_permissions` table.
#[derive(Debug, Clone)]
pub struct PgPermissionChecker {
    db: Db,
}

impl PgPermissionChecker {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PermissionChecker for PgPermissionChecker {
    async fn has_permission(
        &self,
        caller: &Caller,
        permission: Permission,
    ) -> Result<bool, PermissionCheckError> {
        if caller.roles.is_empty() {
            return Ok(false);
        }

        if caller.roles.iter().any(Role::is_super_admin) {
            return Ok(true);
        }

        let roles: Vec<String> = caller.roles.iter().map(ToString::to_string).collect();

        let grants = query_as::<Postgres, RoleGrant>(LIST_GRANTS_FOR_ROLES_SQL)
            .bind(roles)
            .bind(permission.as_str())
            .fetch_all(self.db.pool())
            .await?;

        Ok(is_permitted(&caller.roles, &grants, permission))
    }
}

impl<'r> FromRow<'r, PgRow> for RoleGrant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let permission: String = row.try_get("permission")?;

        Ok(Self {
            role: Role::new(&role).map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?,
            permission: permission.parse::<Permission>().map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "permission".to_string(),
                    source: Box::new(e),
                }
            })?,
        })
    }
}
