//! Users Data

use crate::domain::{ServiceError, users::email::Email};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserData {
    pub identifier: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<Email>,
}

impl UserData {
    pub(crate) fn validate(&self) -> Result<(), ServiceError> {
        if self.identifier.trim().is_empty() {
            return Err(ServiceError::validation("identifier is required"));
        }

        Ok(())
    }
}
