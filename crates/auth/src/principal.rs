use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use harborcms_core::UserId;

use crate::Role;

/// An authenticated admin-panel user, as resolved for the current request.
///
/// The permission core only ever reads `role`; identities are created by the
/// authentication layer and never stored or mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub id: UserId,
    pub email: String,
    pub role: Option<Role>,
}

impl AuthenticatedIdentity {
    pub fn new(id: UserId, email: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }
}

/// Source of the current request's identity (session lookup, token decode, ...).
///
/// Timeouts and retries belong to the implementation; the guard awaits a single
/// call and evaluates nothing before it completes.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn current_identity(&self) -> Option<AuthenticatedIdentity>;
}

/// A request whose identity was already resolved upstream (e.g. by middleware).
#[async_trait]
impl IdentityResolver for Option<AuthenticatedIdentity> {
    async fn current_identity(&self) -> Option<AuthenticatedIdentity> {
        self.clone()
    }
}
