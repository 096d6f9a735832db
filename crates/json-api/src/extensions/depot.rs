//! Depot helper extensions.

use std::any::Any;

use recipes_app::auth::Caller;
use salvo::prelude::{Depot, StatusError};

const CALLER_DEPOT_KEY: &str = "caller";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_caller(&mut self, caller: Caller);

    /// The caller resolved by the auth middleware.
    fn caller_or_401(&self) -> Result<&Caller, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_caller(&mut self, caller: Caller) {
        self.insert(CALLER_DEPOT_KEY, caller);
    }

    fn caller_or_401(&self) -> Result<&Caller, StatusError> {
        self.get::<Caller>(CALLER_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use recipes_app::permissions::Role;

    use super::*;

    #[test]
    fn missing_caller_is_unauthorized() {
        let depot = Depot::new();

        assert!(depot.caller_or_401().is_err());
    }

    #[test]
    fn inserted_caller_is_returned() -> Result<(), StatusError> {
        let mut depot = Depot::new();
        let caller = Caller::new("ada@example.com", [Role::user()]);

        depot.insert_caller(caller.clone());

        assert_eq!(depot.caller_or_401()?, &caller);

        Ok(())
    }
}
