//! Role-based permissions

mod checker;
mod permission;
mod policy;
mod role;

pub use checker::*;
pub use permission::*;
pub use policy::*;
pub use role::*;

use tracing::warn;

use crate::{auth::Caller, domain::ServiceError};

/// Fail with [`ServiceError::Forbidden`] unless `caller` holds `permission`.
///
/// Every service operation calls this before touching the store.
pub(crate) async fn ensure_permitted(
    checker: &dyn PermissionChecker,
    caller: &Caller,
    permission: Permission,
) -> Result<(), ServiceError> {
    if checker.has_permission(caller, permission).await? {
        return Ok(());
    }

    warn!(
        subject = %caller.subject,
        permission = %permission,
        "permission denied"
    );

    Err(ServiceError::Forbidden)
}
