//! In-memory content and user stores backing the admin panel.
//!
//! Storage is plumbing: none of these methods check permissions. Handlers call
//! `require_permission` before reaching them.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use harborcms_auth::{AuthenticatedIdentity, Resource, Role, SessionClaims};
use harborcms_core::{DomainError, DomainResult, RecordId, UserId};

pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A stored content record (blog post, gallery item, contact submission, ...).
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecord {
    pub id: RecordId,
    pub resource: Resource,
    pub fields: Fields,
    /// `None` for records written outside an admin session (imports, site forms).
    pub created_by: Option<UserId>,
    pub updated_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct ContentStore {
    records: Mutex<HashMap<Resource, BTreeMap<RecordId, ContentRecord>>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, resource: Resource) -> Vec<ContentRecord> {
        lock(&self.records)
            .get(&resource)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, resource: Resource) -> usize {
        lock(&self.records).get(&resource).map_or(0, BTreeMap::len)
    }

    pub fn get(&self, resource: Resource, id: RecordId) -> DomainResult<ContentRecord> {
        lock(&self.records)
            .get(&resource)
            .and_then(|rows| rows.get(&id))
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    /// Insert a new record. `actor` is `None` outside an admin session.
    pub fn create(
        &self,
        resource: Resource,
        fields: Fields,
        actor: Option<&AuthenticatedIdentity>,
    ) -> DomainResult<ContentRecord> {
        if fields.is_empty() {
            return Err(DomainError::validation("record must have at least one field"));
        }

        let now = Utc::now();
        let record = ContentRecord {
            id: RecordId::new(),
            resource,
            fields,
            created_by: actor.map(|a| a.id),
            updated_by: actor.map(|a| a.id),
            created_at: now,
            updated_at: now,
        };

        lock(&self.records)
            .entry(resource)
            .or_default()
            .insert(record.id, record.clone());
        Ok(record)
    }

    /// Merge `fields` into an existing record; a `null` value removes a field.
    pub fn update(
        &self,
        resource: Resource,
        id: RecordId,
        fields: Fields,
        actor: &AuthenticatedIdentity,
    ) -> DomainResult<ContentRecord> {
        let mut records = lock(&self.records);
        let record = records
            .get_mut(&resource)
            .and_then(|rows| rows.get_mut(&id))
            .ok_or(DomainError::NotFound)?;

        let mut merged = record.fields.clone();
        for (key, value) in fields {
            if value.is_null() {
                merged.remove(&key);
            } else {
                merged.insert(key, value);
            }
        }
        if merged.is_empty() {
            return Err(DomainError::validation("update would leave the record empty"));
        }
        record.fields = merged;
        record.updated_by = Some(actor.id);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    pub fn delete(&self, resource: Resource, id: RecordId) -> DomainResult<()> {
        lock(&self.records)
            .get_mut(&resource)
            .and_then(|rows| rows.remove(&id))
            .map(|_| ())
            .ok_or(DomainError::NotFound)
    }
}

/// An admin-panel user known to the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub role: Option<Role>,
    pub last_seen_at: DateTime<Utc>,
}

/// Users seen through valid session tokens, and their assigned roles.
///
/// The first sighting records the role carried by the token; afterwards the
/// directory's role is authoritative, so role changes apply on the next request.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the request identity for validated claims.
    pub fn resolve(&self, claims: &SessionClaims) -> AuthenticatedIdentity {
        let claimed = claims.identity();
        let mut users = lock(&self.users);
        let record = users.entry(claimed.id).or_insert_with(|| UserRecord {
            id: claimed.id,
            email: claimed.email.clone(),
            role: claimed.role,
            last_seen_at: Utc::now(),
        });
        record.email = claimed.email;
        record.last_seen_at = Utc::now();

        AuthenticatedIdentity::new(record.id, record.email.clone(), record.role)
    }

    pub fn list(&self) -> Vec<UserRecord> {
        let mut users: Vec<_> = lock(&self.users).values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }

    /// Assign (or clear) a user's role. Users cannot change their own role.
    pub fn assign_role(
        &self,
        actor: &AuthenticatedIdentity,
        target: UserId,
        role: Option<Role>,
    ) -> DomainResult<UserRecord> {
        if actor.id == target {
            return Err(DomainError::validation("you cannot change your own role"));
        }
        let mut users = lock(&self.users);
        let record = users.get_mut(&target).ok_or(DomainError::NotFound)?;
        let previous = std::mem::replace(&mut record.role, role);
        tracing::info!(
            target: "audit",
            actor = %actor.id,
            user_id = %target,
            from = previous.map(|r| r.as_str()).unwrap_or("none"),
            to = role.map(|r| r.as_str()).unwrap_or("none"),
            "role changed"
        );
        Ok(record.clone())
    }
}

/// Shared services handed to every handler.
#[derive(Debug, Default)]
pub struct AppServices {
    pub content: ContentStore,
    pub users: UserDirectory,
}

impl AppServices {
    pub fn new() -> Self {
        Self::default()
    }
}
