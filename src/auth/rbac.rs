// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role-based access control: the static role → permission registry.
//!
//! Role grants are deployment-time policy. The registry is built once at
//! startup and is read-only for the process lifetime; there is no API to
//! add or remove mappings at runtime.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// =============================================================================
// Roles
// =============================================================================

/// Known roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to users and resources.
    Admin,
    /// Read/write access to resources.
    Editor,
    /// Read-only access to resources.
    Viewer,
    /// Normal user, read-only access to own data.
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::User => "user",
        }
    }

    /// Parse a role name. Unknown names yield `None`, never an error: a
    /// token may carry roles this registry does not recognize.
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Permissions
// =============================================================================

/// Known permissions, scoped as `resource:action`.
///
/// Permissions are only ever granted through roles; users never hold them
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    UserRead,
    UserWrite,
    UserDelete,
    UserList,
    ResourceRead,
    ResourceWrite,
    ResourceDelete,
    ResourceList,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::UserRead => "user:read",
            Permission::UserWrite => "user:write",
            Permission::UserDelete => "user:delete",
            Permission::UserList => "user:list",
            Permission::ResourceRead => "resource:read",
            Permission::ResourceWrite => "resource:write",
            Permission::ResourceDelete => "resource:delete",
            Permission::ResourceList => "resource:list",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Read-only lookup table mapping each known role to its permission set.
pub struct RoleRegistry {
    grants: HashMap<Role, HashSet<Permission>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        let mut grants = HashMap::new();

        grants.insert(
            Role::Admin,
            HashSet::from([
                Permission::UserRead,
                Permission::UserWrite,
                Permission::UserDelete,
                Permission::UserList,
                Permission::ResourceRead,
                Permission::ResourceWrite,
                Permission::ResourceDelete,
                Permission::ResourceList,
            ]),
        );
        grants.insert(
            Role::Editor,
            HashSet::from([
                Permission::ResourceRead,
                Permission::ResourceWrite,
                Permission::ResourceList,
                Permission::UserRead,
            ]),
        );
        grants.insert(
            Role::Viewer,
            HashSet::from([Permission::ResourceRead, Permission::ResourceList]),
        );
        grants.insert(
            Role::User,
            HashSet::from([Permission::UserRead, Permission::ResourceRead]),
        );

        Self { grants }
    }

    /// True if any held role grants `permission`.
    ///
    /// Roles the registry does not recognize grant nothing and are skipped;
    /// the result is a pure existence check over the union of all held
    /// roles' grants, so no role takes precedence over another.
    pub fn check_permission(&self, roles: &[String], permission: Permission) -> bool {
        roles
            .iter()
            .filter_map(|name| Role::parse(name))
            .any(|role| {
                self.grants
                    .get(&role)
                    .is_some_and(|granted| granted.contains(&permission))
            })
    }

    /// True if `required` is literally present in the held role set.
    pub fn has_role(&self, roles: &[String], required: Role) -> bool {
        roles.iter().any(|name| name == required.as_str())
    }

    /// True if at least one of `required` is present in the held role set.
    pub fn has_any_role(&self, roles: &[String], required: &[Role]) -> bool {
        required.iter().any(|role| self.has_role(roles, *role))
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn permission_is_union_across_held_roles() {
        let registry = RoleRegistry::new();
        let held = roles(&["editor", "user"]);

        // Granted via editor.
        assert!(registry.check_permission(&held, Permission::ResourceWrite));
        // Granted via either role.
        assert!(registry.check_permission(&held, Permission::UserRead));
        // Granted by neither.
        assert!(!registry.check_permission(&held, Permission::ResourceDelete));
    }

    #[test]
    fn permission_check_is_order_independent() {
        let registry = RoleRegistry::new();
        assert_eq!(
            registry.check_permission(&roles(&["admin", "viewer"]), Permission::UserDelete),
            registry.check_permission(&roles(&["viewer", "admin"]), Permission::UserDelete),
        );
    }

    #[test]
    fn unknown_roles_are_ignored_not_fatal() {
        let registry = RoleRegistry::new();

        // An unrecognized role alongside a granting one still passes.
        assert!(registry.check_permission(
            &roles(&["superuser", "editor"]),
            Permission::ResourceWrite
        ));
        // Unrecognized roles alone grant nothing.
        assert!(!registry.check_permission(&roles(&["superuser"]), Permission::ResourceRead));
    }

    #[test]
    fn has_role_requires_literal_membership() {
        let registry = RoleRegistry::new();
        assert!(!registry.has_role(&roles(&["editor"]), Role::Admin));
        assert!(registry.has_role(&roles(&["editor"]), Role::Editor));
    }

    #[test]
    fn has_any_role_matches_at_least_one() {
        let registry = RoleRegistry::new();
        let required = [Role::Admin, Role::User];

        assert!(registry.has_any_role(&roles(&["user"]), &required));
        assert!(!registry.has_any_role(&roles(&["viewer"]), &required));
    }

    #[test]
    fn admin_holds_every_permission() {
        let registry = RoleRegistry::new();
        let held = roles(&["admin"]);
        for permission in [
            Permission::UserRead,
            Permission::UserWrite,
            Permission::UserDelete,
            Permission::UserList,
            Permission::ResourceRead,
            Permission::ResourceWrite,
            Permission::ResourceDelete,
            Permission::ResourceList,
        ] {
            assert!(registry.check_permission(&held, permission));
        }
    }
}
