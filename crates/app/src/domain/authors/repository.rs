//! Authors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::DeletedRows,
    domain::{
        ServiceError,
        authors::{
            data::AuthorData,
            records::{AuthorRecord, AuthorUuid},
        },
        recipes::records::RecipeUuid,
    },
    pagination::{FieldKind, ListField, ListParameters, ListQuery, ListSource, Page},
};

const GET_AUTHOR_SQL: &str = include_str!("sql/get_author.sql");
const CREATE_AUTHOR_SQL: &str = include_str!("sql/create_author.sql");
const UPDATE_AUTHOR_SQL: &str = include_str!("sql/update_author.sql");
const DELETE_AUTHOR_SQL: &str = include_str!("sql/delete_author.sql");

pub(crate) const AUTHORS: ListSource = ListSource {
    table: "authors",
    fields: &[
        ListField::new("uuid", "uuid", FieldKind::Uuid),
        ListField::new("recipe_uuid", "recipe_uuid", FieldKind::Uuid),
        ListField::new("name", "name", FieldKind::Text),
        ListField::new("created_by", "created_by", FieldKind::Text),
    ],
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthorsRepository;

impl PgAuthorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: AuthorUuid,
        deleted: DeletedRows,
    ) -> Result<AuthorRecord, sqlx::Error> {
        query_as::<Postgres, AuthorRecord>(GET_AUTHOR_SQL)
            .bind(author.into_uuid())
            .bind(deleted.included())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_authors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        params: &ListParameters,
    ) -> Result<Page<AuthorRecord>, ServiceError> {
        let query = ListQuery::parse(AUTHORS, params)?;

        Ok(query.fetch(tx).await?)
    }

    pub(crate) async fn create_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: AuthorUuid,
        data: &AuthorData,
        subject: &str,
    ) -> Result<AuthorRecord, sqlx::Error> {
        query_as::<Postgres, AuthorRecord>(CREATE_AUTHOR_SQL)
            .bind(author.into_uuid())
            .bind(data.recipe_uuid.into_uuid())
            .bind(&data.name)
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: AuthorUuid,
        data: &AuthorData,
        subject: &str,
    ) -> Result<AuthorRecord, sqlx::Error> {
        query_as::<Postgres, AuthorRecord>(UPDATE_AUTHOR_SQL)
            .bind(author.into_uuid())
            .bind(data.recipe_uuid.into_uuid())
            .bind(&data.name)
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_author(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        author: AuthorUuid,
        subject: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_AUTHOR_SQL)
            .bind(author.into_uuid())
            .bind(subject)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AuthorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AuthorUuid::from_uuid(row.try_get("uuid")?),
            recipe_uuid: RecipeUuid::from_uuid(row.try_get("recipe_uuid")?),
            name: row.try_get("name")?,
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
