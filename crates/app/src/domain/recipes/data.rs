//! Recipes Data

use jiff::civil::Date;

use crate::domain::{ServiceError, recipes::records::Visibility};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Recipe fields supplied on add and on update.
///
/// Updates replace every field, so the same shape serves both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeData {
    pub title: String,
    pub visibility: Visibility,
    pub directions: Option<String>,
    pub rating: Option<u8>,
    pub date_of_origin: Option<Date>,
    pub have_made_it_myself: bool,
}

impl RecipeData {
    pub(crate) fn validate(&self) -> Result<(), ServiceError> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::validation("title is required"));
        }

        if let Some(rating) = self.rating
            && !(MIN_RATING..=MAX_RATING).contains(&rating)
        {
            return Err(ServiceError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        Ok(())
    }
}
