//! Role Permissions Data

use crate::permissions::{Permission, Role};

/// Both fields are validated value types, so there is nothing left to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionData {
    pub role: Role,
    pub permission: Permission,
}
