//! Author Records

use jiff::Timestamp;

use crate::{domain::recipes::records::RecipeUuid, uuids::TypedUuid};

/// Author UUID
pub type AuthorUuid = TypedUuid<AuthorRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub uuid: AuthorUuid,
    pub recipe_uuid: RecipeUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl AuthorRecord {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
