//! `harborcms-core` — shared building blocks for the CMS crates.
//!
//! This crate contains **pure** primitives (no HTTP, no storage, no auth policy).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{RecordId, UserId};
