//! Author Models

use recipes_app::domain::authors::{data::AuthorData, records::AuthorRecord};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pagination::PaginationResponse;

/// Author Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthorRequest {
    /// Recipe the author is credited on
    pub recipe_uuid: Uuid,

    pub name: String,
}

impl From<AuthorRequest> for AuthorData {
    fn from(request: AuthorRequest) -> Self {
        AuthorData {
            recipe_uuid: request.recipe_uuid.into(),
            name: request.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthorResponse {
    pub uuid: Uuid,
    pub recipe_uuid: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl From<AuthorRecord> for AuthorResponse {
    fn from(author: AuthorRecord) -> Self {
        AuthorResponse {
            uuid: author.uuid.into(),
            recipe_uuid: author.recipe_uuid.into(),
            name: author.name,
            created_at: author.created_at.to_string(),
            updated_at: author.updated_at.to_string(),
            created_by: author.created_by,
            updated_by: author.updated_by,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthorsResponse {
    pub authors: Vec<AuthorResponse>,
    pub pagination: PaginationResponse,
}
