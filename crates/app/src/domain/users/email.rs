//! Email addresses

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

const MAX_LENGTH: usize = 254;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidEmail {
    #[error("email is empty")]
    Empty,

    #[error("email is longer than {MAX_LENGTH} characters")]
    TooLong,

    #[error("email `{0}` contains whitespace")]
    Whitespace(String),

    #[error("email `{0}` must contain exactly one `@`")]
    Separator(String),

    #[error("email `{0}` is missing a local part")]
    LocalPart(String),

    #[error("email `{0}` has an invalid domain")]
    Domain(String),
}

/// A syntactically plausible email address.
///
/// Only the shape is checked; deliverability is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, InvalidEmail> {
        let value = value.trim();

        if value.is_empty() {
            return Err(InvalidEmail::Empty);
        }

        if value.len() > MAX_LENGTH {
            return Err(InvalidEmail::TooLong);
        }

        if value.chars().any(char::is_whitespace) {
            return Err(InvalidEmail::Whitespace(value.to_string()));
        }

        let mut parts = value.split('@');

        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InvalidEmail::Separator(value.to_string()));
        };

        if local.is_empty() {
            return Err(InvalidEmail::LocalPart(value.to_string()));
        }

        let labels_ok = domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'));

        if !domain.contains('.') || !labels_ok {
            return Err(InvalidEmail::Domain(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = InvalidEmail;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
