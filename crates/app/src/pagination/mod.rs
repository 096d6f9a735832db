//! Filtering, sorting and paging for list queries.
//!
//! Callers send a `filters` expression such as `title@=*soup,rating>=4` and a
//! `sort_order` such as `-rating,title`. Both are resolved against a fixed
//! allowlist of fields per table, so user input never reaches SQL text.

mod errors;
mod fields;
mod filters;
mod page;
mod params;
mod query;
mod sorting;

pub use errors::ListQueryError;
pub use fields::{FieldKind, ListField, ListSource};
pub use filters::{FilterOperator, FilterTerm, FilterValue, parse_filters};
pub use page::Page;
pub use params::{DEFAULT_PAGE_SIZE, ListParameters, MAX_PAGE_SIZE};
pub(crate) use query::ListQuery;
pub use sorting::{SortDirection, SortTerm, parse_sort_order};
