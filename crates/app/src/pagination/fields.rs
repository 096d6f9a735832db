//! Field allowlists.

use crate::pagination::ListQueryError;

/// How a field's filter values are parsed and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    Date,
    Uuid,
}

/// A field callers may filter or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListField {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl ListField {
    #[must_use]
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind }
    }
}

/// A table plus the fields callers may filter and sort on.
#[derive(Debug, Clone, Copy)]
pub struct ListSource {
    pub table: &'static str,
    pub fields: &'static [ListField],
}

impl ListSource {
    /// Resolve a field name ignoring case and underscores, so `dateOfOrigin`
    /// and `date_of_origin` name the same field.
    ///
    /// # Errors
    ///
    /// Returns [`ListQueryError::UnknownField`] when the field is not allowed.
    pub fn field(&self, name: &str) -> Result<&'static ListField, ListQueryError> {
        let wanted = normalise(name);

        self.fields
            .iter()
            .find(|field| normalise(field.name) == wanted)
            .ok_or_else(|| ListQueryError::UnknownField(name.trim().to_string()))
    }
}

fn normalise(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
