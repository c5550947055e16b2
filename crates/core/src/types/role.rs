//! User roles as reported by the identity provider.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated session.
///
/// The identity provider may report roles this crate does not know about;
/// those are kept verbatim in [`UserRole::Other`] so an admin policy can
/// still match on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// Full access to the admin panel.
    Admin,
    /// Can edit content but not manage coupons or subscriptions.
    Editor,
    /// Paying subscriber.
    Premium,
    /// Regular signed-in user.
    User,
    /// Any other role string.
    Other(String),
}

impl UserRole {
    /// Returns the canonical role string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Premium => "premium",
            Self::User => "user",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "editor" => Self::Editor,
            "premium" => Self::Premium,
            "user" => Self::User,
            _ => Self::Other(s.trim().to_owned()),
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_owned()
    }
}
