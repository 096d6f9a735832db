//! Shared test infrastructure.

mod context;
pub(crate) mod helpers;

pub use context::TestContext;
pub use db::TestDb;
