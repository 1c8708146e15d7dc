//! Server-side enforcement guard.
//!
//! [`require_permission`] is the single trusted enforcement point: every
//! mutation entry point calls it before touching storage. UI gates are advisory
//! only and never consulted here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use harborcms_core::UserId;

use crate::authorize::{get_permission_description, has_permission};
use crate::permissions::{Action, Resource};
use crate::principal::{AuthenticatedIdentity, IdentityResolver};
use crate::roles::Role;

/// Structured record of a denied request. For audit logs only; never rendered
/// to the denied user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditMetadata {
    pub user_id: UserId,
    pub email: String,
    pub role: Option<Role>,
    pub resource: Resource,
    pub action: Action,
    pub timestamp: DateTime<Utc>,
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden: you do not have permission to {description}")]
    PermissionDenied {
        description: String,
        audit: Box<AuditMetadata>,
    },
}

impl AccessError {
    /// Text that is safe to show the acting user: names the action and
    /// resource, never the audit metadata.
    pub fn public_message(&self) -> String {
        match self {
            AccessError::Unauthenticated => "You need to sign in to continue.".to_string(),
            AccessError::PermissionDenied { description, .. } => format!(
                "You don't have permission to {description}. Contact an administrator if you need access."
            ),
        }
    }

    pub fn audit(&self) -> Option<&AuditMetadata> {
        match self {
            AccessError::PermissionDenied { audit, .. } => Some(audit),
            AccessError::Unauthenticated => None,
        }
    }
}

/// Resolve the current identity and check it against the matrix.
///
/// `context` is attached to the audit record on denial (e.g. the record id being
/// mutated). On success the identity is returned so callers can stamp audit
/// trails or scope queries.
pub async fn require_permission<R>(
    resolver: &R,
    resource: Resource,
    action: Action,
    context: Option<serde_json::Value>,
) -> Result<AuthenticatedIdentity, AccessError>
where
    R: IdentityResolver + ?Sized,
{
    let identity = require_authenticated(resolver).await?;

    if has_permission(identity.role, resource, action) {
        tracing::debug!(
            user_id = %identity.id,
            resource = resource.as_str(),
            action = action.as_str(),
            "permission granted"
        );
        return Ok(identity);
    }

    let description = get_permission_description(resource, action);
    let audit = AuditMetadata {
        user_id: identity.id,
        email: identity.email,
        role: identity.role,
        resource,
        action,
        timestamp: Utc::now(),
        context,
    };

    tracing::warn!(
        target: "audit",
        user_id = %audit.user_id,
        email = %audit.email,
        role = audit.role.map(|r| r.as_str()).unwrap_or("none"),
        resource = resource.as_str(),
        action = action.as_str(),
        context = ?audit.context,
        "permission denied: {description}"
    );

    Err(AccessError::PermissionDenied {
        description,
        audit: Box::new(audit),
    })
}

/// "Must be signed in" check for concerns outside the resource taxonomy.
/// Grants nothing by itself.
pub async fn require_authenticated<R>(resolver: &R) -> Result<AuthenticatedIdentity, AccessError>
where
    R: IdentityResolver + ?Sized,
{
    resolver
        .current_identity()
        .await
        .ok_or(AccessError::Unauthenticated)
}
