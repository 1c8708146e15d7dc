use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::permissions::UnknownName;

/// Admin-panel role.
///
/// Roles are a closed set. Untrusted role strings coming from a session are
/// parsed at the boundary with [`Role::from_claim`]; anything unrecognized is
/// treated as "no role", which denies every permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access to every resource, including user role management.
    SuperAdmin,
    /// Full content CRUD, no user management.
    ContentAdmin,
    /// Create/update content, no delete.
    Editor,
    /// Read-only across all resources.
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::ContentAdmin, Role::Editor, Role::Viewer];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::ContentAdmin => "CONTENT_ADMIN",
            Role::Editor => "EDITOR",
            Role::Viewer => "VIEWER",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Full access to all content and user role management",
            Role::ContentAdmin => "Full content management without user administration",
            Role::Editor => "Create and edit content; cannot delete",
            Role::Viewer => "Read-only access to the admin panel",
        }
    }

    /// Parse a wire name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL.into_iter().find(|r| r.as_str() == normalized)
    }

    /// Turn an untrusted, optional role claim into a role.
    ///
    /// Unknown values collapse to `None` (fail-closed).
    pub fn from_claim(claim: Option<&str>) -> Option<Self> {
        let raw = claim?;
        let role = Self::parse(raw);
        if role.is_none() {
            tracing::debug!(claim = raw, "unrecognized role claim; treating as no role");
        }
        role
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownName {
            kind: "role",
            value: s.to_string(),
        })
    }
}
