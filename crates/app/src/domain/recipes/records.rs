//! Recipe Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Recipe UUID
pub type RecipeUuid = TypedUuid<RecipeRecord>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown visibility `{0}`, expected `Public` or `Private`")]
pub struct InvalidVisibility(pub String);

/// Who may see a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = InvalidVisibility;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("public") => Ok(Self::Public),
            v if v.eq_ignore_ascii_case("private") => Ok(Self::Private),
            other => Err(InvalidVisibility(other.to_string())),
        }
    }
}

/// Recipe Record
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRecord {
    pub uuid: RecipeUuid,
    pub title: String,
    pub visibility: Visibility,
    pub directions: Option<String>,
    pub rating: Option<u8>,
    pub date_of_origin: Option<Date>,
    pub have_made_it_myself: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl RecipeRecord {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_parses_case_insensitively() {
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        assert_eq!(" PRIVATE ".parse::<Visibility>(), Ok(Visibility::Private));
    }

    #[test]
    fn unknown_visibility_is_rejected() {
        assert_eq!(
            "friends".parse::<Visibility>(),
            Err(InvalidVisibility("friends".to_string()))
        );
    }
}
