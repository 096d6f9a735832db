//! Ingredients Data

use jiff::civil::Date;

use crate::domain::{ServiceError, recipes::records::RecipeUuid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientData {
    pub recipe_uuid: RecipeUuid,
    pub name: String,
    pub quantity: Option<String>,
    pub unit_of_measure: Option<String>,
    pub expires_on: Option<Date>,
}

impl IngredientData {
    pub(crate) fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("name is required"));
        }

        if self
            .quantity
            .as_deref()
            .is_some_and(|quantity| quantity.trim().is_empty())
        {
            return Err(ServiceError::validation("quantity cannot be blank"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> IngredientData {
        IngredientData {
            recipe_uuid: RecipeUuid::new(),
            name: "Flour".to_string(),
            quantity: Some("1 1/2".to_string()),
            unit_of_measure: Some("cups".to_string()),
            expires_on: None,
        }
    }

    #[test]
    fn valid_data_passes() {
        assert!(data().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let data = IngredientData {
            name: String::new(),
            ..data()
        };

        assert!(matches!(data.validate(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn blank_quantity_is_rejected_but_missing_is_fine() {
        let blank = IngredientData {
            quantity: Some(" ".to_string()),
            ..data()
        };
        let missing = IngredientData {
            quantity: None,
            ..data()
        };

        assert!(matches!(blank.validate(), Err(ServiceError::Validation(_))));
        assert!(missing.validate().is_ok());
    }
}
