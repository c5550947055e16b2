//! Admin access policy.

use notevault_core::UserRole;

use super::Session;
use crate::config::AdminAccessConfig;

/// Decides whether a session may use the admin panel.
pub trait AdminPolicy: Send + Sync {
    fn is_admin(&self, session: &Session) -> bool;
}

/// Grants admin access by role or by email allowlist.
#[derive(Debug, Clone)]
pub struct ConfiguredAdminPolicy {
    roles: Vec<UserRole>,
    emails: Vec<String>,
}

impl ConfiguredAdminPolicy {
    #[must_use]
    pub fn new(roles: Vec<UserRole>, emails: Vec<String>) -> Self {
        Self {
            roles,
            emails: emails
                .into_iter()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AdminAccessConfig) -> Self {
        Self::new(config.roles.clone(), config.emails.clone())
    }
}

impl AdminPolicy for ConfiguredAdminPolicy {
    fn is_admin(&self, session: &Session) -> bool {
        let role_matches = session.user.role.as_ref().is_some_and(|role| {
            self.roles
                .iter()
                .any(|allowed| allowed.as_str().eq_ignore_ascii_case(role.as_str()))
        });

        let email_matches = session.user.email.as_deref().is_some_and(|email| {
            let email = email.trim().to_lowercase();
            self.emails.iter().any(|allowed| *allowed == email)
        });

        role_matches || email_matches
    }
}
