//! List query errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListQueryError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("filter `{0}` has no operator")]
    MissingOperator(String),

    #[error("filter `{0}` has no field name")]
    MissingField(String),

    #[error("operator `{operator}` is not supported for field `{field}`")]
    UnsupportedOperator { field: String, operator: String },

    #[error("invalid value `{value}` for field `{field}`")]
    InvalidValue { field: String, value: String },
}
