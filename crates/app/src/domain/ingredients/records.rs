//! Ingredient Records

use jiff::{Timestamp, civil::Date};

use crate::{domain::recipes::records::RecipeUuid, uuids::TypedUuid};

/// Ingredient UUID
pub type IngredientUuid = TypedUuid<IngredientRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRecord {
    pub uuid: IngredientUuid,
    pub recipe_uuid: RecipeUuid,
    pub name: String,
    /// Free-form amount such as `1 1/2`.
    pub quantity: Option<String>,
    pub unit_of_measure: Option<String>,
    pub expires_on: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl IngredientRecord {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
