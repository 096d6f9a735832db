//! Ingredients Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::DeletedRows,
    domain::{
        ServiceError,
        ingredients::{
            data::IngredientData,
            records::{IngredientRecord, IngredientUuid},
        },
        recipes::records::RecipeUuid,
    },
    pagination::{FieldKind, ListField, ListParameters, ListQuery, ListSource, Page},
};

const GET_INGREDIENT_SQL: &str = include_str!("sql/get_ingredient.sql");
const CREATE_INGREDIENT_SQL: &str = include_str!("sql/create_ingredient.sql");
const UPDATE_INGREDIENT_SQL: &str = include_str!("sql/update_ingredient.sql");
const DELETE_INGREDIENT_SQL: &str = include_str!("sql/delete_ingredient.sql");

pub(crate) const INGREDIENTS: ListSource = ListSource {
    table: "ingredients",
    fields: &[
        ListField::new("uuid", "uuid", FieldKind::Uuid),
        ListField::new("recipe_uuid", "recipe_uuid", FieldKind::Uuid),
        ListField::new("name", "name", FieldKind::Text),
        ListField::new("quantity", "quantity", FieldKind::Text),
        ListField::new("unit_of_measure", "unit_of_measure", FieldKind::Text),
        ListField::new("expires_on", "expires_on", FieldKind::Date),
    ],
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgIngredientsRepository;

impl PgIngredientsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_ingredient(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ingredient: IngredientUuid,
        deleted: DeletedRows,
    ) -> Result<IngredientRecord, sqlx::Error> {
        query_as::<Postgres, IngredientRecord>(GET_INGREDIENT_SQL)
            .bind(ingredient.into_uuid())
            .bind(deleted.included())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_ingredients(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        params: &ListParameters,
    ) -> Result<Page<IngredientRecord>, ServiceError> {
        let query = ListQuery::parse(INGREDIENTS, params)?;

        Ok(query.fetch(tx).await?)
    }

    pub(crate) async fn create_ingredient(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ingredient: IngredientUuid,
        data: &IngredientData,
        subject: &str,
    ) -> Result<IngredientRecord, sqlx::Error> {
        query_as::<Postgres, IngredientRecord>(CREATE_INGREDIENT_SQL)
            .bind(ingredient.into_uuid())
            .bind(data.recipe_uuid.into_uuid())
            .bind(&data.name)
            .bind(data.quantity.as_deref())
            .bind(data.unit_of_measure.as_deref())
            .bind(data.expires_on.map(SqlxDate::from))
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_ingredient(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ingredient: IngredientUuid,
        data: &IngredientData,
        subject: &str,
    ) -> Result<IngredientRecord, sqlx::Error> {
        query_as::<Postgres, IngredientRecord>(UPDATE_INGREDIENT_SQL)
            .bind(ingredient.into_uuid())
            .bind(data.recipe_uuid.into_uuid())
            .bind(&data.name)
            .bind(data.quantity.as_deref())
            .bind(data.unit_of_measure.as_deref())
            .bind(data.expires_on.map(SqlxDate::from))
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_ingredient(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ingredient: IngredientUuid,
        subject: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_INGREDIENT_SQL)
            .bind(ingredient.into_uuid())
            .bind(subject)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for IngredientRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: IngredientUuid::from_uuid(row.try_get("uuid")?),
            recipe_uuid: RecipeUuid::from_uuid(row.try_get("recipe_uuid")?),
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            unit_of_measure: row.try_get("unit_of_measure")?,
            expires_on: row
                .try_get::<Option<SqlxDate>, _>("expires_on")?
                .map(SqlxDate::to_jiff),
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
