//! Filter expression parsing.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::Date;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::pagination::{FieldKind, ListField, ListQueryError, ListSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Contains,
    StartsWith,
    NotContains,
    NotStartsWith,
}

impl FilterOperator {
    /// Negated operators combine `|` alternatives with AND rather than OR.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        matches!(self, Self::NotEquals | Self::NotContains | Self::NotStartsWith)
    }

    const fn supports(self, kind: FieldKind) -> bool {
        match self {
            Self::Equals | Self::NotEquals => true,
            Self::GreaterThan
            | Self::LessThan
            | Self::GreaterThanOrEqual
            | Self::LessThanOrEqual => matches!(kind, FieldKind::Integer | FieldKind::Date),
            Self::Contains | Self::StartsWith | Self::NotContains | Self::NotStartsWith => {
                matches!(kind, FieldKind::Text)
            }
        }
    }
}

/// Operator tokens, longest first so `>=` wins over `>`.
const OPERATORS: [(&str, FilterOperator, bool); 16] = [
    ("!@=*", FilterOperator::NotContains, true),
    ("!_=*", FilterOperator::NotStartsWith, true),
    ("==*", FilterOperator::Equals, true),
    ("!=*", FilterOperator::NotEquals, true),
    ("@=*", FilterOperator::Contains, true),
    ("_=*", FilterOperator::StartsWith, true),
    ("!@=", FilterOperator::NotContains, false),
    ("!_=", FilterOperator::NotStartsWith, false),
    (">=", FilterOperator::GreaterThanOrEqual, false),
    ("<=", FilterOperator::LessThanOrEqual, false),
    ("==", FilterOperator::Equals, false),
    ("!=", FilterOperator::NotEquals, false),
    ("@=", FilterOperator::Contains, false),
    ("_=", FilterOperator::StartsWith, false),
    (">", FilterOperator::GreaterThan, false),
    ("<", FilterOperator::LessThan, false),
];

/// A typed filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Date(Date),
    Uuid(Uuid),
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => Display::fmt(value, f),
            Self::Boolean(value) => Display::fmt(value, f),
            Self::Date(value) => Display::fmt(value, f),
            Self::Uuid(value) => Display::fmt(value, f),
        }
    }
}

/// One `<field><operator><value>[|<value>...]` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    pub field: &'static ListField,
    pub operator: FilterOperator,
    pub case_insensitive: bool,
    pub values: SmallVec<[FilterValue; 1]>,
}

/// Parse a comma-separated filter expression against `source`.
///
/// `\,` and `\|` escape the separators inside values.
///
/// # Errors
///
/// Returns a [`ListQueryError`] for unknown fields, operators the field's kind
/// does not support, or values that do not parse as the field's kind.
pub fn parse_filters(source: &ListSource, input: &str) -> Result<Vec<FilterTerm>, ListQueryError> {
    split_unescaped(input, ',')
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .map(|term| parse_term(source, term))
        .collect()
}

fn parse_term(source: &ListSource, term: &str) -> Result<FilterTerm, ListQueryError> {
    let (position, token, operator, case_insensitive) =
        find_operator(term).ok_or_else(|| ListQueryError::MissingOperator(term.to_string()))?;

    let (name, rest) = term.split_at(position);
    let raw_value = rest.get(token.len()..).unwrap_or_default();

    if name.trim().is_empty() {
        return Err(ListQueryError::MissingField(term.to_string()));
    }

    let field = source.field(name)?;

    if !operator.supports(field.kind) || (case_insensitive && field.kind != FieldKind::Text) {
        return Err(ListQueryError::UnsupportedOperator {
            field: field.name.to_string(),
            operator: token.to_string(),
        });
    }

    let values = split_unescaped(raw_value, '|')
        .iter()
        .map(|value| parse_value(field, value.trim()))
        .collect::<Result<SmallVec<_>, _>>()?;

    Ok(FilterTerm {
        field,
        operator,
        case_insensitive,
        values,
    })
}

fn find_operator(term: &str) -> Option<(usize, &'static str, FilterOperator, bool)> {
    term.char_indices().find_map(|(position, _)| {
        let tail = term.get(position..)?;

        OPERATORS
            .iter()
            .find(|(token, _, _)| tail.starts_with(token))
            .map(|(token, operator, case_insensitive)| {
                (position, *token, *operator, *case_insensitive)
            })
    })
}

fn parse_value(field: &ListField, raw: &str) -> Result<FilterValue, ListQueryError> {
    let invalid = || ListQueryError::InvalidValue {
        field: field.name.to_string(),
        value: raw.to_string(),
    };

    if raw.is_empty() {
        return Err(invalid());
    }

    match field.kind {
        FieldKind::Text => Ok(FilterValue::Text(raw.to_string())),
        FieldKind::Integer => raw
            .parse()
            .map(FilterValue::Integer)
            .map_err(|_parse| invalid()),
        FieldKind::Boolean => raw
            .to_ascii_lowercase()
            .parse()
            .map(FilterValue::Boolean)
            .map_err(|_parse| invalid()),
        FieldKind::Date => raw
            .parse()
            .map(FilterValue::Date)
            .map_err(|_parse| invalid()),
        FieldKind::Uuid => Uuid::try_parse(raw)
            .map(FilterValue::Uuid)
            .map_err(|_parse| invalid()),
    }
}

/// Split on `separator`, treating `\<separator>` as a literal. Other escapes
/// are kept so a later pass can handle them.
fn split_unescaped(input: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&separator) {
            current.push(separator);
            chars.next();
        } else if c == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    parts.push(current);

    parts
}
