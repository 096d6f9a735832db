//! Pure permission policy.

use rustc_hash::FxHashSet;

use crate::permissions::{Permission, Role};

/// A single `role_permissions` row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleGrant {
    pub role: Role,
    pub permission: Permission,
}

/// Decide whether a caller holding `roles` has `permission` given `grants`.
///
/// `SuperAdmin` holds every permission. Otherwise one of the caller's roles
/// must be granted `permission`. A caller without roles has no permissions.
#[must_use]
pub fn is_permitted(roles: &[Role], grants: &[RoleGrant], permission: Permission) -> bool {
    if roles.iter().any(Role::is_super_admin) {
        return true;
    }

    let roles: FxHashSet<&Role> = roles.iter().collect();

    grants
        .iter()
        .any(|grant| grant.permission == permission && roles.contains(&grant.role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(role: Role, permission: Permission) -> RoleGrant {
        RoleGrant { role, permission }
    }

    #[test]
    fn super_admin_needs_no_grants() {
        assert!(is_permitted(
            &[Role::super_admin()],
            &[],
            Permission::CanDeleteRolePermissions
        ));
    }

    #[test]
    fn granted_role_is_permitted() {
        let grants = [grant(Role::user(), Permission::CanReadRecipes)];

        assert!(is_permitted(
            &[Role::user()],
            &grants,
            Permission::CanReadRecipes
        ));
    }

    #[test]
    fn grant_for_another_permission_does_not_apply() {
        let grants = [grant(Role::user(), Permission::CanReadRecipes)];

        assert!(!is_permitted(
            &[Role::user()],
            &grants,
            Permission::CanAddRecipes
        ));
    }

    #[test]
    fn grant_for_another_role_does_not_apply() {
        let grants = [grant(Role::super_admin(), Permission::CanReadRecipes)];

        assert!(!is_permitted(
            &[Role::user()],
            &grants,
            Permission::CanReadRecipes
        ));
    }

    #[test]
    fn caller_without_roles_has_nothing() {
        let grants = [grant(Role::user(), Permission::CanReadRecipes)];

        assert!(!is_permitted(&[], &grants, Permission::CanReadRecipes));
    }
}
