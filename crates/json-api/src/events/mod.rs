//! Recipe Events

pub(crate) mod recipe_added;
