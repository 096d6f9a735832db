//! Recipe management domain, persistence and messaging.

pub mod auth;
pub mod bootstrap;
pub mod context;
pub mod database;
pub mod domain;
pub mod events;
pub mod pagination;
pub mod permissions;
pub mod uuids;

#[cfg(test)]
mod test;
