//! Role Permission Models

use recipes_app::{
    domain::role_permissions::{data::RolePermissionData, records::RolePermissionRecord},
    permissions::{Permission, Role},
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, pagination::PaginationResponse};

/// Role Permission Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RolePermissionRequest {
    /// `SuperAdmin` or `User`
    pub role: String,

    /// Permission name, e.g. `CanReadRecipes`
    pub permission: String,
}

impl RolePermissionRequest {
    pub(crate) fn into_data(self) -> Result<RolePermissionData, StatusError> {
        Ok(RolePermissionData {
            role: Role::new(&self.role).or_400("could not parse \"role\"")?,
            permission: self
                .permission
                .parse::<Permission>()
                .or_400("could not parse \"permission\"")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RolePermissionResponse {
    pub uuid: Uuid,
    pub role: String,
    pub permission: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RolePermissionRecord> for RolePermissionResponse {
    fn from(grant: RolePermissionRecord) -> Self {
        RolePermissionResponse {
            uuid: grant.uuid.into(),
            role: grant.role.as_str().to_string(),
            permission: grant.permission.as_str().to_string(),
            created_at: grant.created_at.to_string(),
            updated_at: grant.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RolePermissionsResponse {
    pub role_permissions: Vec<RolePermissionResponse>,
    pub pagination: PaginationResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: &str, permission: &str) -> RolePermissionRequest {
        RolePermissionRequest {
            role: role.to_string(),
            permission: permission.to_string(),
        }
    }

    #[test]
    fn valid_request_parses() {
        let data = request("User", "CanReadRecipes").into_data();

        assert_eq!(
            data.ok(),
            Some(RolePermissionData {
                role: Role::user(),
                permission: Permission::CanReadRecipes,
            })
        );
    }

    #[test]
    fn unknown_role_or_permission_is_rejected() {
        assert!(request("Chef", "CanReadRecipes").into_data().is_err());
        assert!(request("User", "CanCook").into_data().is_err());
    }
}
