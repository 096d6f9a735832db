//! Sort order parsing.

use crate::pagination::{ListField, ListQueryError, ListSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub(crate) const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortTerm {
    pub field: &'static ListField,
    pub direction: SortDirection,
}

/// Parse `field,-other` into sort terms; a leading `-` sorts descending.
///
/// # Errors
///
/// Returns [`ListQueryError::UnknownField`] for fields outside the allowlist.
pub fn parse_sort_order(source: &ListSource, input: &str) -> Result<Vec<SortTerm>, ListQueryError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| -> Result<SortTerm, ListQueryError> {
            let (name, direction) = part.strip_prefix('-').map_or(
                (part, SortDirection::Ascending),
                |name| (name, SortDirection::Descending),
            );

            Ok(SortTerm {
                field: source.field(name)?,
                direction,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::pagination::FieldKind;

    use super::*;

    const SOURCE: ListSource = ListSource {
        table: "recipes",
        fields: &[
            ListField::new("title", "title", FieldKind::Text),
            ListField::new("rating", "rating", FieldKind::Integer),
        ],
    };

    #[test]
    fn parses_directions() -> Result<(), ListQueryError> {
        let terms = parse_sort_order(&SOURCE, "-rating, title")?;

        let parsed: Vec<(&str, SortDirection)> = terms
            .iter()
            .map(|term| (term.field.name, term.direction))
            .collect();

        assert_eq!(
            parsed,
            vec![
                ("rating", SortDirection::Descending),
                ("title", SortDirection::Ascending),
            ]
        );

        Ok(())
    }

    #[test]
    fn empty_input_means_default_order() -> Result<(), ListQueryError> {
        assert!(parse_sort_order(&SOURCE, " , ")?.is_empty());

        Ok(())
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert_eq!(
            parse_sort_order(&SOURCE, "-calories"),
            Err(ListQueryError::UnknownField("calories".to_string()))
        );
    }
}
