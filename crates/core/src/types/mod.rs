//! Core types for NoteVault.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod document_id;
pub mod role;
pub mod slug;

pub use document_id::{DocumentId, DocumentIdError};
pub use role::UserRole;
pub use slug::{Slug, SlugError};
