//! `harborcms-auth` — role-based access control for the admin panel.
//!
//! This crate is intentionally decoupled from HTTP and storage. It owns the
//! resource/action taxonomy, the static permission matrix, the pure query
//! engine, the server-side enforcement guard and the advisory UI gate.

pub mod authorize;
pub mod claims;
pub mod gate;
pub mod guard;
pub mod matrix;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{
    can_manage_users, capabilities, explain_permission, get_permission_description,
    get_resource_permissions, has_permission, PermissionExplanation, RbacRegistry,
    ResourceCapabilities, ResourcePermissions,
};
pub use claims::{validate_claims, Hs256TokenValidator, SessionClaims, TokenValidationError, TokenValidator};
pub use gate::{CapabilityGate, SessionState};
pub use guard::{require_authenticated, require_permission, AccessError, AuditMetadata};
pub use matrix::PermissionMatrix;
pub use permissions::{Action, ActionSet, Resource, UnknownName};
pub use principal::{AuthenticatedIdentity, IdentityResolver};
pub use roles::Role;
