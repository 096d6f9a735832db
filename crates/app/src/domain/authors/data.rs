//! Authors Data

use crate::domain::{ServiceError, recipes::records::RecipeUuid};

/// Author fields supplied on add and on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorData {
    pub recipe_uuid: RecipeUuid,
    pub name: String,
}

impl AuthorData {
    pub(crate) fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("name is required"));
        }

        Ok(())
    }
}
