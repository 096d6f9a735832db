//! Ingredient Models

use std::string::ToString;

use recipes_app::domain::ingredients::{data::IngredientData, records::IngredientRecord};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{fields::optional_date, pagination::PaginationResponse};

/// Ingredient Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IngredientRequest {
    /// Recipe the ingredient belongs to
    pub recipe_uuid: Uuid,

    pub name: String,

    /// Free-form amount, e.g. "2" or "a pinch"
    #[serde(default)]
    pub quantity: Option<String>,

    #[serde(default)]
    pub unit_of_measure: Option<String>,

    /// Best-before date (YYYY-MM-DD)
    #[serde(default)]
    pub expires_on: Option<String>,
}

impl IngredientRequest {
    pub(crate) fn into_data(self) -> Result<IngredientData, StatusError> {
        Ok(IngredientData {
            expires_on: optional_date(self.expires_on.as_deref(), "expires_on")?,
            recipe_uuid: self.recipe_uuid.into(),
            name: self.name,
            quantity: self.quantity,
            unit_of_measure: self.unit_of_measure,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IngredientResponse {
    pub uuid: Uuid,
    pub recipe_uuid: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub unit_of_measure: Option<String>,
    pub expires_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<IngredientRecord> for IngredientResponse {
    fn from(ingredient: IngredientRecord) -> Self {
        IngredientResponse {
            uuid: ingredient.uuid.into(),
            recipe_uuid: ingredient.recipe_uuid.into(),
            name: ingredient.name,
            quantity: ingredient.quantity,
            unit_of_measure: ingredient.unit_of_measure,
            expires_on: ingredient.expires_on.as_ref().map(ToString::to_string),
            created_at: ingredient.created_at.to_string(),
            updated_at: ingredient.updated_at.to_string(),
            created_by: ingredient.created_by,
            updated_by: ingredient.updated_by,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IngredientsResponse {
    pub ingredients: Vec<IngredientResponse>,
    pub pagination: PaginationResponse,
}
