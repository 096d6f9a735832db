//! Recipe management domain

pub mod authors;
pub mod errors;
pub mod ingredients;
pub mod recipes;
pub mod role_permissions;
pub mod users;

pub use errors::ServiceError;
