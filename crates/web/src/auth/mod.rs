//! Session resolution and admin policy.
//!
//! # Architecture
//!
//! - [`IdentityProvider`] turns a request's headers into a [`Session`], or
//!   `None` when the request is anonymous. It never reads ambient request
//!   state; the headers are always passed in.
//! - [`AdminPolicy`] decides whether a session may use the admin panel.
//! - Two providers ship: [`HttpIdentityProvider`] asks an Auth.js-compatible
//!   session endpoint, [`StoreIdentityProvider`] reads a local
//!   `tower-sessions` store.

mod error;
mod http;
mod policy;
mod store;

pub use error::AuthError;
pub use http::HttpIdentityProvider;
pub use policy::{AdminPolicy, ConfiguredAdminPolicy};
pub use store::{CURRENT_USER_KEY, DEFAULT_STORE_COOKIE, StoreIdentityProvider};

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use notevault_core::UserRole;
use serde::{Deserialize, Serialize};
use tower_sessions::cookie::Cookie;

/// An authenticated session as reported by the identity provider.
///
/// Read-only: this crate never writes sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    /// When the session stops being valid.
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

/// The user behind a [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl Session {
    /// Stable identifier for the user: the provider's user id, or the email
    /// when the provider does not expose ids.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.id.as_deref().or(self.user.email.as_deref())
    }

    /// Whether the session expired before `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// Resolves the session carried by a request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the name of this provider (for logging).
    fn name(&self) -> &str;

    /// Resolve the session for a request.
    ///
    /// Returns `Ok(None)` when the request carries no valid session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ProviderUnavailable`] if the provider cannot
    /// answer. That is never reported as `Ok(None)`.
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, AuthError>;
}

/// Collect the cookies named in `names` from every `Cookie` header.
///
/// Also matches chunked cookies (`name.0`, `name.1`, ...) that Auth.js
/// writes when a session token outgrows a single cookie.
pub(crate) fn session_cookies(headers: &HeaderMap, names: &[String]) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .filter(|cookie| is_session_cookie(cookie.name(), names) && !cookie.value().is_empty())
        .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
        .collect()
}

fn is_session_cookie(name: &str, names: &[String]) -> bool {
    names.iter().any(|expected| {
        name == expected
            || name
                .strip_prefix(expected.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|chunk| !chunk.is_empty() && chunk.chars().all(|c| c.is_ascii_digit()))
    })
}
