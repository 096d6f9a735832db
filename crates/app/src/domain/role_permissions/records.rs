//! Role Permission Records

use jiff::Timestamp;

use crate::{
    permissions::{Permission, Role},
    uuids::TypedUuid,
};

/// Role permission UUID
pub type RolePermissionUuid = TypedUuid<RolePermissionRecord>;

/// A stored grant of one permission to one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionRecord {
    pub uuid: RolePermissionUuid,
    pub role: Role,
    pub permission: Permission,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl RolePermissionRecord {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
