//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::DeletedRows,
    domain::{
        ServiceError,
        users::{
            data::UserData,
            email::Email,
            records::{UserRecord, UserUuid},
        },
    },
    pagination::{FieldKind, ListField, ListParameters, ListQuery, ListSource, Page},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

pub(crate) const USERS: ListSource = ListSource {
    table: "users",
    fields: &[
        ListField::new("uuid", "uuid", FieldKind::Uuid),
        ListField::new("identifier", "identifier", FieldKind::Text),
        ListField::new("first_name", "first_name", FieldKind::Text),
        ListField::new("last_name", "last_name", FieldKind::Text),
        ListField::new("username", "username", FieldKind::Text),
        ListField::new("email", "email", FieldKind::Text),
    ],
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        deleted: DeletedRows,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .bind(deleted.included())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        params: &ListParameters,
    ) -> Result<Page<UserRecord>, ServiceError> {
        let query = ListQuery::parse(USERS, params)?;

        Ok(query.fetch(tx).await?)
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        data: &UserData,
        subject: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(data.identifier.trim())
            .bind(data.first_name.as_deref())
            .bind(data.last_name.as_deref())
            .bind(data.username.as_deref())
            .bind(data.email.as_ref().map(Email::as_str))
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        data: &UserData,
        subject: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(data.identifier.trim())
            .bind(data.first_name.as_deref())
            .bind(data.last_name.as_deref())
            .bind(data.username.as_deref())
            .bind(data.email.as_ref().map(Email::as_str))
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        subject: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .bind(subject)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let email = row
            .try_get::<Option<String>, _>("email")?
            .map(|email| Email::parse(&email))
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "email".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            identifier: row.try_get("identifier")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            username: row.try_get("username")?,
            email,
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
