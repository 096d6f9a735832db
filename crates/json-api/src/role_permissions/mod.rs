//! Role Permissions

mod handlers;
mod models;

pub(crate) use handlers::*;
