//! User Models

use recipes_app::domain::users::{data::UserData, email::Email, records::UserRecord};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, pagination::PaginationResponse};

/// User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserRequest {
    /// External identity, unique among live users
    pub identifier: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl UserRequest {
    pub(crate) fn into_data(self) -> Result<UserData, StatusError> {
        let email = self
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .or_400("could not parse \"email\"")?;

        Ok(UserData {
            identifier: self.identifier,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub identifier: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            identifier: user.identifier,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email.map(|email| email.as_str().to_string()),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationResponse,
}
