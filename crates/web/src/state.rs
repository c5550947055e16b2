//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{AuthError, ConfiguredAdminPolicy, HttpIdentityProvider, IdentityProvider};
use crate::config::WebConfig;
use crate::middleware::AdminGate;
use crate::sanity::{ContentClient, SanityError};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("content client: {0}")]
    Content(#[from] SanityError),
    #[error("identity provider: {0}")]
    Auth(#[from] AuthError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    content: ContentClient,
    admin_gate: AdminGate,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// Sessions are resolved through the Auth.js session endpoint at
    /// `AUTH_URL`; admin access follows `ADMIN_ROLES` / `ADMIN_EMAILS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content client or identity provider cannot be
    /// built from the configuration.
    pub fn new(config: &WebConfig) -> Result<Self, StateError> {
        let provider = HttpIdentityProvider::new(&config.auth)?;
        Self::with_identity_provider(config, Arc::new(provider))
    }

    /// Create the application state with a caller-supplied identity provider,
    /// e.g. a [`StoreIdentityProvider`](crate::auth::StoreIdentityProvider)
    /// over a shared `tower-sessions` store. `config.auth` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the content client cannot be built.
    pub fn with_identity_provider(
        config: &WebConfig,
        provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self, StateError> {
        let content = ContentClient::new(&config.sanity, &config.content_cache)?;
        let policy = ConfiguredAdminPolicy::from_config(&config.admin);
        let admin_gate = AdminGate::new(provider, Arc::new(policy));

        Ok(Self::from_parts(content, admin_gate))
    }

    /// Assemble the state from already built parts.
    #[must_use]
    pub fn from_parts(content: ContentClient, admin_gate: AdminGate) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                content,
                admin_gate,
            }),
        }
    }

    /// Get a reference to the content store client.
    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.inner.content
    }

    /// Get a reference to the admin gate.
    #[must_use]
    pub fn admin_gate(&self) -> &AdminGate {
        &self.inner.admin_gate
    }
}

impl FromRef<AppState> for ContentClient {
    fn from_ref(state: &AppState) -> Self {
        state.content().clone()
    }
}

impl FromRef<AppState> for AdminGate {
    fn from_ref(state: &AppState) -> Self {
        state.admin_gate().clone()
    }
}
