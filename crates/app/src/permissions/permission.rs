//! Permission names.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown permission `{0}`")]
pub struct UnknownPermission(pub String);

/// A named capability gating exactly one service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    CanReadRecipes,
    CanAddRecipes,
    CanUpdateRecipes,
    CanDeleteRecipes,
    CanReadAuthors,
    CanAddAuthors,
    CanUpdateAuthors,
    CanDeleteAuthors,
    CanReadIngredients,
    CanAddIngredients,
    CanUpdateIngredients,
    CanDeleteIngredients,
    CanReadUsers,
    CanAddUsers,
    CanUpdateUsers,
    CanDeleteUsers,
    CanReadRolePermissions,
    CanAddRolePermissions,
    CanUpdateRolePermissions,
    CanDeleteRolePermissions,
    CanPublishRecipeEvents,
}

impl Permission {
    pub const ALL: [Self; 21] = [
        Self::CanReadRecipes,
        Self::CanAddRecipes,
        Self::CanUpdateRecipes,
        Self::CanDeleteRecipes,
        Self::CanReadAuthors,
        Self::CanAddAuthors,
        Self::CanUpdateAuthors,
        Self::CanDeleteAuthors,
        Self::CanReadIngredients,
        Self::CanAddIngredients,
        Self::CanUpdateIngredients,
        Self::CanDeleteIngredients,
        Self::CanReadUsers,
        Self::CanAddUsers,
        Self::CanUpdateUsers,
        Self::CanDeleteUsers,
        Self::CanReadRolePermissions,
        Self::CanAddRolePermissions,
        Self::CanUpdateRolePermissions,
        Self::CanDeleteRolePermissions,
        Self::CanPublishRecipeEvents,
    ];

    /// Read permissions granted to the `User` role by the seeder.
    pub const READS: [Self; 5] = [
        Self::CanReadRecipes,
        Self::CanReadAuthors,
        Self::CanReadIngredients,
        Self::CanReadUsers,
        Self::CanReadRolePermissions,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CanReadRecipes => "CanReadRecipes",
            Self::CanAddRecipes => "CanAddRecipes",
            Self::CanUpdateRecipes => "CanUpdateRecipes",
            Self::CanDeleteRecipes => "CanDeleteRecipes",
            Self::CanReadAuthors => "CanReadAuthors",
            Self::CanAddAuthors => "CanAddAuthors",
            Self::CanUpdateAuthors => "CanUpdateAuthors",
            Self::CanDeleteAuthors => "CanDeleteAuthors",
            Self::CanReadIngredients => "CanReadIngredients",
            Self::CanAddIngredients => "CanAddIngredients",
            Self::CanUpdateIngredients => "CanUpdateIngredients",
            Self::CanDeleteIngredients => "CanDeleteIngredients",
            Self::CanReadUsers => "CanReadUsers",
            Self::CanAddUsers => "CanAddUsers",
            Self::CanUpdateUsers => "CanUpdateUsers",
            Self::CanDeleteUsers => "CanDeleteUsers",
            Self::CanReadRolePermissions => "CanReadRolePermissions",
            Self::CanAddRolePermissions => "CanAddRolePermissions",
            Self::CanUpdateRolePermissions => "CanUpdateRolePermissions",
            Self::CanDeleteRolePermissions => "CanDeleteRolePermissions",
            Self::CanPublishRecipeEvents => "CanPublishRecipeEvents",
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownPermission(value.to_string()))
    }
}
