use async_trait::async_trait;

use harborcms_auth::{AuthenticatedIdentity, IdentityResolver, SessionState};

/// Session for a request, as resolved by the session middleware.
///
/// Always present on protected routes; anonymous when no valid token was sent.
/// Handlers pass it to the guard, which decides between 401 and 403.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionContext {
    identity: Option<AuthenticatedIdentity>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(identity: AuthenticatedIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        self.identity.as_ref()
    }

    /// Client-observable projection (role only).
    pub fn state(&self) -> SessionState {
        match &self.identity {
            Some(identity) => SessionState::Authenticated(identity.role),
            None => SessionState::Anonymous,
        }
    }
}

#[async_trait]
impl IdentityResolver for SessionContext {
    async fn current_identity(&self) -> Option<AuthenticatedIdentity> {
        self.identity.clone()
    }
}
