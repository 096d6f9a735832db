//! Recipe Models

use std::string::ToString;

use recipes_app::domain::recipes::{
    data::RecipeData,
    records::{RecipeRecord, Visibility},
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, fields::optional_date, pagination::PaginationResponse};

/// Recipe Request
///
/// Used for both create and update; updates replace every field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecipeRequest {
    pub title: String,

    /// `Public` (default) or `Private`
    #[serde(default)]
    pub visibility: Option<String>,

    #[serde(default)]
    pub directions: Option<String>,

    /// Rating from 1 to 5
    #[serde(default)]
    pub rating: Option<u8>,

    /// Date the recipe originated (YYYY-MM-DD)
    #[serde(default)]
    pub date_of_origin: Option<String>,

    #[serde(default)]
    pub have_made_it_myself: bool,
}

impl RecipeRequest {
    pub(crate) fn into_data(self) -> Result<RecipeData, StatusError> {
        let visibility = self
            .visibility
            .as_deref()
            .map(str::parse::<Visibility>)
            .transpose()
            .or_400("could not parse \"visibility\"")?
            .unwrap_or_default();

        Ok(RecipeData {
            title: self.title,
            visibility,
            directions: self.directions,
            rating: self.rating,
            date_of_origin: optional_date(self.date_of_origin.as_deref(), "date_of_origin")?,
            have_made_it_myself: self.have_made_it_myself,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecipeResponse {
    /// The unique identifier of the recipe
    pub uuid: Uuid,

    pub title: String,
    pub visibility: String,
    pub directions: Option<String>,
    pub rating: Option<u8>,
    pub date_of_origin: Option<String>,
    pub have_made_it_myself: bool,

    /// The date and time the recipe was created
    pub created_at: String,

    /// The date and time the recipe was last updated
    pub updated_at: String,

    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<RecipeRecord> for RecipeResponse {
    fn from(recipe: RecipeRecord) -> Self {
        RecipeResponse {
            uuid: recipe.uuid.into(),
            title: recipe.title,
            visibility: recipe.visibility.to_string(),
            directions: recipe.directions,
            rating: recipe.rating,
            date_of_origin: recipe.date_of_origin.as_ref().map(ToString::to_string),
            have_made_it_myself: recipe.have_made_it_myself,
            created_at: recipe.created_at.to_string(),
            updated_at: recipe.updated_at.to_string(),
            created_by: recipe.created_by,
            updated_by: recipe.updated_by,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecipesResponse {
    /// The requested page of recipes
    pub recipes: Vec<RecipeResponse>,

    pub pagination: PaginationResponse,
}
