//! Role Permissions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::DeletedRows,
    domain::{
        ServiceError,
        role_permissions::{
            data::RolePermissionData,
            records::{RolePermissionRecord, RolePermissionUuid},
        },
    },
    pagination::{FieldKind, ListField, ListParameters, ListQuery, ListSource, Page},
    permissions::{Permission, Role},
};

const GET_ROLE_PERMISSION_SQL: &str = include_str!("sql/get_role_permission.sql");
const CREATE_ROLE_PERMISSION_SQL: &str = include_str!("sql/create_role_permission.sql");
const UPDATE_ROLE_PERMISSION_SQL: &str = include_str!("sql/update_role_permission.sql");
const DELETE_ROLE_PERMISSION_SQL: &str = include_str!("sql/delete_role_permission.sql");

pub(crate) const ROLE_PERMISSIONS: ListSource = ListSource {
    table: "role_permissions",
    fields: &[
        ListField::new("uuid", "uuid", FieldKind::Uuid),
        ListField::new("role", "role", FieldKind::Text),
        ListField::new("permission", "permission", FieldKind::Text),
    ],
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRolePermissionsRepository;

impl PgRolePermissionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_role_permission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        role_permission: RolePermissionUuid,
        deleted: DeletedRows,
    ) -> Result<RolePermissionRecord, sqlx::Error> {
        query_as::<Postgres, RolePermissionRecord>(GET_ROLE_PERMISSION_SQL)
            .bind(role_permission.into_uuid())
            .bind(deleted.included())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_role_permissions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        params: &ListParameters,
    ) -> Result<Page<RolePermissionRecord>, ServiceError> {
        let query = ListQuery::parse(ROLE_PERMISSIONS, params)?;

        Ok(query.fetch(tx).await?)
    }

    pub(crate) async fn create_role_permission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        role_permission: RolePermissionUuid,
        data: &RolePermissionData,
        subject: &str,
    ) -> Result<RolePermissionRecord, sqlx::Error> {
        query_as::<Postgres, RolePermissionRecord>(CREATE_ROLE_PERMISSION_SQL)
            .bind(role_permission.into_uuid())
            .bind(data.role.as_str())
            .bind(data.permission.as_str())
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_role_permission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        role_permission: RolePermissionUuid,
        data: &RolePermissionData,
        subject: &str,
    ) -> Result<RolePermissionRecord, sqlx::Error> {
        query_as::<Postgres, RolePermissionRecord>(UPDATE_ROLE_PERMISSION_SQL)
            .bind(role_permission.into_uuid())
            .bind(data.role.as_str())
            .bind(data.permission.as_str())
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_role_permission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        role_permission: RolePermissionUuid,
        subject: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ROLE_PERMISSION_SQL)
            .bind(role_permission.into_uuid())
            .bind(subject)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for RolePermissionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let permission: String = row.try_get("permission")?;

        Ok(Self {
            uuid: RolePermissionUuid::from_uuid(row.try_get("uuid")?),
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
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
            created_by: row.try_get("created_by")?,
            updated_by: row.try_get("updated_by")?,
        })
    }
}
