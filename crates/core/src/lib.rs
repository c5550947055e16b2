//! NoteVault Core - Shared types library.
//!
//! This crate provides common types used across all NoteVault components:
//! - `web` - Admin panel and public note pages over the Sanity content store
//! - `cli` - Command-line tools for querying content and checking sessions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every type
//! here validates its input on construction, so values that reach a content
//! query have already been checked.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for slugs, document IDs and user roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
