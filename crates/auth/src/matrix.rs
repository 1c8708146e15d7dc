//! Static role × resource permission matrix.
//!
//! The table is built from an exhaustive `match`, so a new [`Role`] or
//! [`Resource`] variant does not compile until it is given a row here. Pairs
//! that map to `None` have no entry and are implicitly denied.

use crate::permissions::{Action, ActionSet, Resource};
use crate::roles::Role;

const VIEW_ONLY: ActionSet = ActionSet::of(&[Action::View]);
const FULL_CRUD: ActionSet = ActionSet::of(&[Action::View, Action::Create, Action::Update, Action::Delete]);
const CREATE_UPDATE: ActionSet = ActionSet::of(&[Action::View, Action::Create, Action::Update]);
const TRIAGE: ActionSet = ActionSet::of(&[Action::View, Action::Update, Action::Delete]);
const USER_ADMIN: ActionSet = ActionSet::of(&[Action::View, Action::Update, Action::ManageRoles]);

/// Read-only handle on the permission table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Granted actions for a role/resource pair, or `None` when the pair has no
    /// entry.
    pub const fn entry(role: Role, resource: Resource) -> Option<ActionSet> {
        use Resource::*;

        match role {
            Role::SuperAdmin => match resource {
                HeroBanners | About | Programs | Objectives | TeamMembers | Gallery | BlogPosts
                | LegalDocuments => Some(FULL_CRUD),
                ContactSubmissions => Some(TRIAGE),
                Users => Some(USER_ADMIN),
                Dashboard => Some(VIEW_ONLY),
            },
            Role::ContentAdmin => match resource {
                HeroBanners | About | Programs | Objectives | TeamMembers | Gallery | BlogPosts
                | LegalDocuments => Some(FULL_CRUD),
                ContactSubmissions => Some(TRIAGE),
                Users => None,
                Dashboard => Some(VIEW_ONLY),
            },
            Role::Editor => match resource {
                HeroBanners | About | Programs | Objectives | TeamMembers | Gallery | BlogPosts
                | LegalDocuments => Some(CREATE_UPDATE),
                ContactSubmissions => Some(VIEW_ONLY),
                Users => None,
                Dashboard => Some(VIEW_ONLY),
            },
            Role::Viewer => match resource {
                HeroBanners | About | Programs | Objectives | TeamMembers | Gallery | BlogPosts
                | LegalDocuments | ContactSubmissions | Users | Dashboard => Some(VIEW_ONLY),
            },
        }
    }

    /// Every present entry, in `Role::ALL` × `Resource::ALL` order.
    pub fn entries() -> impl Iterator<Item = (Role, Resource, ActionSet)> {
        Role::ALL.into_iter().flat_map(|role| {
            Resource::ALL
                .into_iter()
                .filter_map(move |resource| Self::entry(role, resource).map(|set| (role, resource, set)))
        })
    }
}
