//! Resource/action taxonomy.
//!
//! Both enumerations are closed: adding a variant is a compile error in every
//! exhaustive `match` that maps them (the matrix, descriptions, wire names).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A protectable content category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    HeroBanners,
    About,
    Programs,
    Objectives,
    TeamMembers,
    Gallery,
    BlogPosts,
    LegalDocuments,
    /// Messages from the public contact form. They originate outside the admin
    /// panel, so no role is granted CREATE.
    ContactSubmissions,
    Users,
    Dashboard,
}

impl Resource {
    pub const ALL: [Resource; 11] = [
        Resource::HeroBanners,
        Resource::About,
        Resource::Programs,
        Resource::Objectives,
        Resource::TeamMembers,
        Resource::Gallery,
        Resource::BlogPosts,
        Resource::LegalDocuments,
        Resource::ContactSubmissions,
        Resource::Users,
        Resource::Dashboard,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::HeroBanners => "HERO_BANNERS",
            Resource::About => "ABOUT",
            Resource::Programs => "PROGRAMS",
            Resource::Objectives => "OBJECTIVES",
            Resource::TeamMembers => "TEAM_MEMBERS",
            Resource::Gallery => "GALLERY",
            Resource::BlogPosts => "BLOG_POSTS",
            Resource::LegalDocuments => "LEGAL_DOCUMENTS",
            Resource::ContactSubmissions => "CONTACT_SUBMISSIONS",
            Resource::Users => "USERS",
            Resource::Dashboard => "DASHBOARD",
        }
    }

    /// Plain-language noun used in permission descriptions.
    pub const fn label(&self) -> &'static str {
        match self {
            Resource::HeroBanners => "hero banners",
            Resource::About => "about content",
            Resource::Programs => "programs",
            Resource::Objectives => "objectives",
            Resource::TeamMembers => "team members",
            Resource::Gallery => "gallery items",
            Resource::BlogPosts => "blog posts",
            Resource::LegalDocuments => "legal documents",
            Resource::ContactSubmissions => "contact submissions",
            Resource::Users => "users",
            Resource::Dashboard => "dashboard",
        }
    }

    /// Publicly editable site content (everything except submissions, users and
    /// the dashboard).
    pub const fn is_site_content(&self) -> bool {
        !matches!(
            self,
            Resource::ContactSubmissions | Resource::Users | Resource::Dashboard
        )
    }

    /// Parse a wire name. Accepts `BLOG_POSTS`, `blog_posts` and `blog-posts`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL.into_iter().find(|r| r.as_str() == normalized)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownName::new("resource", s))
    }
}

/// An operation kind, shared across all resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    ManageRoles,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::ManageRoles,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::View => "VIEW",
            Action::Create => "CREATE",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::ManageRoles => "MANAGE_ROLES",
        }
    }

    /// Create, update and delete change stored content.
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Action::Create | Action::Update | Action::Delete)
    }

    const fn bit(&self) -> u8 {
        1 << (*self as u8)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL.into_iter().find(|a| a.as_str() == normalized)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownName::new("action", s))
    }
}

/// Returned when a string does not name a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownName {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Compact set of [`Action`]s granted for one role/resource pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    /// Build a set at compile time.
    pub const fn of(actions: &[Action]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < actions.len() {
            bits |= actions[i].bit();
            i += 1;
        }
        ActionSet(bits)
    }

    pub const fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl Serialize for ActionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
