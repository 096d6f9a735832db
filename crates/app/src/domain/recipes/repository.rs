//! Recipes Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::DeletedRows,
    domain::{
        ServiceError,
        recipes::{
            data::RecipeData,
            records::{RecipeRecord, RecipeUuid, Visibility},
        },
    },
    pagination::{FieldKind, ListField, ListParameters, ListQuery, ListSource, Page},
};

const GET_RECIPE_SQL: &str = include_str!("sql/get_recipe.sql");
const CREATE_RECIPE_SQL: &str = include_str!("sql/create_recipe.sql");
const UPDATE_RECIPE_SQL: &str = include_str!("sql/update_recipe.sql");
const DELETE_RECIPE_SQL: &str = include_str!("sql/delete_recipe.sql");
const RECIPE_EXISTS_SQL: &str = include_str!("sql/recipe_exists.sql");

pub(crate) const RECIPES: ListSource = ListSource {
    table: "recipes",
    fields: &[
        ListField::new("uuid", "uuid", FieldKind::Uuid),
        ListField::new("title", "title", FieldKind::Text),
        ListField::new("visibility", "visibility", FieldKind::Text),
        ListField::new("directions", "directions", FieldKind::Text),
        ListField::new("rating", "rating", FieldKind::Integer),
        ListField::new("date_of_origin", "date_of_origin", FieldKind::Date),
        ListField::new("have_made_it_myself", "have_made_it_myself", FieldKind::Boolean),
        ListField::new("created_by", "created_by", FieldKind::Text),
    ],
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRecipesRepository;

impl PgRecipesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_recipe(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipe: RecipeUuid,
        deleted: DeletedRows,
    ) -> Result<RecipeRecord, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(GET_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .bind(deleted.included())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_recipes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        params: &ListParameters,
    ) -> Result<Page<RecipeRecord>, ServiceError> {
        let query = ListQuery::parse(RECIPES, params)?;

        Ok(query.fetch(tx).await?)
    }

    pub(crate) async fn create_recipe(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipe: RecipeUuid,
        data: &RecipeData,
        subject: &str,
    ) -> Result<RecipeRecord, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(CREATE_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .bind(&data.title)
            .bind(data.visibility.as_str())
            .bind(data.directions.as_deref())
            .bind(data.rating.map(i32::from))
            .bind(data.date_of_origin.map(SqlxDate::from))
            .bind(data.have_made_it_myself)
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_recipe(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipe: RecipeUuid,
        data: &RecipeData,
        subject: &str,
    ) -> Result<RecipeRecord, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(UPDATE_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .bind(&data.title)
            .bind(data.visibility.as_str())
            .bind(data.directions.as_deref())
            .bind(data.rating.map(i32::from))
            .bind(data.date_of_origin.map(SqlxDate::from))
            .bind(data.have_made_it_myself)
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_recipe(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipe: RecipeUuid,
        subject: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .bind(subject)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Whether a live (not soft-deleted) recipe exists. Used to validate child
    /// records before they are attached.
    pub(crate) async fn recipe_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        recipe: RecipeUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(RECIPE_EXISTS_SQL)
            .bind(recipe.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RecipeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let visibility: String = row.try_get("visibility")?;

        let visibility = visibility
            .parse::<Visibility>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "visibility".to_string(),
                source: Box::new(e),
            })?;

        let rating = row
            .try_get::<Option<i32>, _>("rating")?
            .map(u8::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "rating".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: RecipeUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            visibility,
            directions: row.try_get("directions")?,
            rating,
            date_of_origin: row
                .try_get::<Option<SqlxDate>, _>("date_of_origin")?
                .map(SqlxDate::to_jiff),
            have_made_it_myself: row.try_get("have_made_it_myself")?,
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
