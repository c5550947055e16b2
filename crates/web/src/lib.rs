//! NoteVault web library.
//!
//! Content query and admin authorization layer of the NoteVault front end:
//! typed, cached reads from the Sanity content store and a session-based gate
//! in front of the admin panel. Exposed as a library so the binary, the CLI
//! and the integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod sanity;
pub mod state;
