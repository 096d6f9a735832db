//! Users

pub mod data;
pub mod email;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use service::*;
