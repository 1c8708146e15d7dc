//! Client-side capability gate.
//!
//! **Not a security boundary.** The gate only hides affordances (buttons,
//! sections) a session could not use; [`crate::require_permission`] remains the
//! sole authority, and nothing server-side may branch on a gate's result.
//!
//! The gate is a stateless projection of `{session, resource, action}` onto
//! `{visible, hidden}`, re-evaluated on every render. Unresolved sessions hide.

use serde::{Deserialize, Serialize};

use crate::authorize::has_permission;
use crate::permissions::{Action, Resource};
use crate::roles::Role;

/// Client-observable session state (role only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "role", rename_all = "snake_case")]
pub enum SessionState {
    /// Authentication has not resolved yet.
    #[default]
    Loading,
    /// Resolved with no signed-in user.
    Anonymous,
    /// Signed in; the role may still be absent.
    Authenticated(Option<Role>),
}

impl SessionState {
    /// Role to evaluate; `None` for loading and anonymous sessions.
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated(role) => *role,
            SessionState::Loading | SessionState::Anonymous => None,
        }
    }
}

/// Declarative conditional-render primitive, parameterized by the same
/// resource/action pair the matching mutation enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityGate {
    pub resource: Resource,
    pub action: Action,
}

impl CapabilityGate {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    pub fn is_visible(&self, session: &SessionState) -> bool {
        has_permission(session.role(), self.resource, self.action)
    }

    /// Render `children` when permitted, `fallback` otherwise. Only the chosen
    /// branch is evaluated.
    pub fn render<T>(
        &self,
        session: &SessionState,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.is_visible(session) {
            children()
        } else {
            fallback()
        }
    }

    /// Like [`render`](Self::render) with the default fallback: render nothing.
    pub fn render_or_default<T: Default>(&self, session: &SessionState, children: impl FnOnce() -> T) -> T {
        self.render(session, children, T::default)
    }
}
