//! Request field parsing shared by the entity handlers.

use jiff::civil::Date;
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse an optional `YYYY-MM-DD` date.
pub(crate) fn optional_date(value: Option<&str>, field: &str) -> Result<Option<Date>, StatusError> {
    value
        .map(|raw| raw.trim().parse::<Date>())
        .transpose()
        .or_400(&format!("could not parse \"{field}\""))
}
