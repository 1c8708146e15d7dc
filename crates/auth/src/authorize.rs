//! Permission query engine.
//!
//! - No IO
//! - No panics
//! - Total over the closed Role/Resource/Action universe

use serde::Serialize;

use crate::matrix::PermissionMatrix;
use crate::permissions::{Action, ActionSet, Resource};
use crate::roles::Role;

/// Can `role` perform `action` on `resource`?
///
/// An absent role, a missing matrix entry, or an action outside the granted
/// set all deny.
pub fn has_permission(role: Option<Role>, resource: Resource, action: Action) -> bool {
    let Some(role) = role else {
        return false;
    };
    match PermissionMatrix::entry(role, resource) {
        Some(granted) => granted.contains(action),
        None => false,
    }
}

/// CRUD bundle for one role/resource pair, as consumed by UI gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePermissions {
    pub can_view: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

/// Derived from [`has_permission`] only.
pub fn get_resource_permissions(role: Option<Role>, resource: Resource) -> ResourcePermissions {
    ResourcePermissions {
        can_view: has_permission(role, resource, Action::View),
        can_create: has_permission(role, resource, Action::Create),
        can_update: has_permission(role, resource, Action::Update),
        can_delete: has_permission(role, resource, Action::Delete),
    }
}

pub fn can_manage_users(role: Option<Role>) -> bool {
    has_permission(role, Resource::Users, Action::ManageRoles)
}

/// Natural-language phrase for an action on a resource, e.g. "create gallery
/// items". Independent of the matrix: every pair has a description, including
/// pairs no role is ever granted.
pub fn get_permission_description(resource: Resource, action: Action) -> String {
    let noun = resource.label();
    match action {
        Action::View => format!("view {noun}"),
        Action::Create => format!("create {noun}"),
        Action::Update => format!("update {noun}"),
        Action::Delete => format!("delete {noun}"),
        Action::ManageRoles => format!("manage roles for {noun}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capability snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// One resource row of a role's capability snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCapabilities {
    pub resource: Resource,
    #[serde(flatten)]
    pub permissions: ResourcePermissions,
    pub can_manage_roles: bool,
}

/// The matrix projected onto a single role, for UI clients that cannot link
/// this crate. Every resource appears, with all flags false for denied rows.
pub fn capabilities(role: Option<Role>) -> Vec<ResourceCapabilities> {
    Resource::ALL
        .into_iter()
        .map(|resource| ResourceCapabilities {
            resource,
            permissions: get_resource_permissions(role, resource),
            can_manage_roles: has_permission(role, resource, Action::ManageRoles),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Contains only policy information (role, resource, action); never identity
/// data, so it is safe to return to the acting user.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionExplanation {
    pub role: Option<Role>,
    pub resource: Resource,
    pub action: Action,
    pub description: String,
    pub granted: bool,
    pub reason: String,
    /// Actions granted to the role on this resource (empty when no entry).
    pub granted_actions: ActionSet,
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoRole,
    NoMatrixEntry,
    ActionNotGranted,
}

/// Explain why a decision was (or would be) made.
pub fn explain_permission(role: Option<Role>, resource: Resource, action: Action) -> PermissionExplanation {
    let description = get_permission_description(resource, action);
    let entry = role.and_then(|r| PermissionMatrix::entry(r, resource));
    let granted = has_permission(role, resource, action);

    let (reason, denial) = match (role, entry) {
        (None, _) => ("No role is assigned to this session".to_string(), Some(DenialKind::NoRole)),
        (Some(r), None) => (
            format!("Role {r} has no access to {}", resource.label()),
            Some(DenialKind::NoMatrixEntry),
        ),
        (Some(r), Some(_)) if granted => (format!("Role {r} may {description}"), None),
        (Some(r), Some(_)) => (
            format!("Role {r} may not {description}"),
            Some(DenialKind::ActionNotGranted),
        ),
    };

    PermissionExplanation {
        role,
        resource,
        action,
        description,
        granted,
        reason,
        granted_actions: entry.unwrap_or(ActionSet::EMPTY),
        denial,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry (audit/display)
// ─────────────────────────────────────────────────────────────────────────────

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub description: &'static str,
    pub grants: Vec<ResourceGrant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceGrant {
    pub resource: Resource,
    pub actions: ActionSet,
}

/// Complete, read-only view of the RBAC model for auditing.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub roles: Vec<RoleDefinition>,
    pub resources: Vec<Resource>,
    pub actions: Vec<Action>,
}

impl RbacRegistry {
    pub fn new() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleDefinition {
                role,
                description: role.description(),
                grants: PermissionMatrix::entries()
                    .filter(|(r, _, _)| *r == role)
                    .map(|(_, resource, actions)| ResourceGrant { resource, actions })
                    .collect(),
            })
            .collect();

        Self {
            roles,
            resources: Resource::ALL.to_vec(),
            actions: Action::ALL.to_vec(),
        }
    }

    pub fn role(&self, role: Role) -> Option<&RoleDefinition> {
        self.roles.iter().find(|d| d.role == role)
    }
}

impl Default for RbacRegistry {
    fn default() -> Self {
        Self::new()
    }
}
