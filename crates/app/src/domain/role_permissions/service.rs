//! Role permissions service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Caller,
    database::{Db, DeletedRows},
    domain::{
        ServiceError,
        role_permissions::{
            data::RolePermissionData,
            records::{RolePermissionRecord, RolePermissionUuid},
            repository::PgRolePermissionsRepository,
        },
    },
    pagination::{ListParameters, Page},
    permissions::{Permission, PermissionChecker, ensure_permitted},
};

#[derive(Clone)]
pub struct PgRolePermissionsService {
    db: Db,
    permissions: Arc<dyn PermissionChecker>,
    repository: PgRolePermissionsRepository,
}

impl PgRolePermissionsService {
    #[must_use]
    pub fn new(db: Db, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            db,
            permissions,
            repository: PgRolePermissionsRepository::new(),
        }
    }

    pub async fn find_role_permission(
        &self,
        caller: &Caller,
        role_permission: RolePermissionUuid,
        deleted: DeletedRows,
    ) -> Result<RolePermissionRecord, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanReadRolePermissions,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .get_role_permission(&mut tx, role_permission, deleted)
            .await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl RolePermissionsService for PgRolePermissionsService {
    async fn get_role_permission(
        &self,
        caller: &Caller,
        role_permission: RolePermissionUuid,
    ) -> Result<RolePermissionRecord, ServiceError> {
        self.find_role_permission(caller, role_permission, DeletedRows::Exclude)
            .await
    }

    async fn list_role_permissions(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<RolePermissionRecord>, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanReadRolePermissions,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let page = self
            .repository
            .list_role_permissions(&mut tx, &params)
            .await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn add_role_permission(
        &self,
        caller: &Caller,
        data: RolePermissionData,
    ) -> Result<RolePermissionRecord, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanAddRolePermissions,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_role_permission(&mut tx, RolePermissionUuid::new(), &data, &caller.subject)
            .await?;

        tx.commit().await?;

        info!(
            role = %created.role,
            permission = %created.permission,
            granted_by = %caller.subject,
            "permission granted"
        );

        Ok(created)
    }

    async fn update_role_permission(
        &self,
        caller: &Caller,
        role_permission: RolePermissionUuid,
        data: RolePermissionData,
    ) -> Result<RolePermissionRecord, ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanUpdateRolePermissions,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_role_permission(&mut tx, role_permission, &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_role_permission(
        &self,
        caller: &Caller,
        role_permission: RolePermissionUuid,
    ) -> Result<(), ServiceError> {
        ensure_permitted(
            self.permissions.as_ref(),
            caller,
            Permission::CanDeleteRolePermissions,
        )
        .await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_role_permission(&mut tx, role_permission, &caller.subject)
            .await?;

        if rows_affected == 0 {
            return Err(ServiceError::NotFound);
        }

        tx.commit().await?;

        info!(
            role_permission = %role_permission,
            revoked_by = %caller.subject,
            "permission revoked"
        );

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait RolePermissionsService: Send + Sync {
    async fn get_role_permission(
        &self,
        caller: &Caller,
        role_permission: RolePermissionUuid,
    ) -> Result<RolePermissionRecord, ServiceError>;

    async fn list_role_permissions(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<RolePermissionRecord>, ServiceError>;

    /// Grant a permission to a role. A role holds each permission at most once.
    async fn add_role_permission(
        &self,
        caller: &Caller,
        data: RolePermissionData,
    ) -> Result<RolePermissionRecord, ServiceError>;

    async fn update_role_permission(
        &self,
        caller: &Caller,
        role_permission: RolePermissionUuid,
        data: RolePermissionData,
    ) -> Result<RolePermissionRecord, ServiceError>;

    async fn delete_role_permission(
        &self,
        caller: &Caller,
        role_permission: RolePermissionUuid,
    ) -> Result<(), ServiceError>;
}
