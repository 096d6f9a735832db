//! Role value type.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

/// Role holding every permission without needing grants.
pub const SUPER_ADMIN: &str = "SuperAdmin";

/// Default role for regular callers.
pub const USER: &str = "User";

const KNOWN_ROLES: [&str; 2] = [SUPER_ADMIN, USER];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role `{0}`")]
pub struct InvalidRole(pub String);

/// A validated role name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Role(String);

impl Role {
    /// Parse a role name, normalising its case to the canonical spelling.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRole`] when `value` is not a known role.
    pub fn new(value: &str) -> Result<Self, InvalidRole> {
        let trimmed = value.trim();

        KNOWN_ROLES
            .into_iter()
            .find(|known| known.eq_ignore_ascii_case(trimmed))
            .map(|known| Self(known.to_string()))
            .ok_or_else(|| InvalidRole(trimmed.to_string()))
    }

    #[must_use]
    pub fn super_admin() -> Self {
        Self(SUPER_ADMIN.to_string())
    }

    #[must_use]
    pub fn user() -> Self {
        Self(USER.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.0 == SUPER_ADMIN
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Role {
    type Error = InvalidRole;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
