//! Admin gate: middleware and extractor for the `/admin` subtree.
//!
//! Every check resolves the session afresh from the request headers; nothing
//! is cached between requests. Anonymous and non-admin requests get the same
//! `303 See Other` to [`DENIED_REDIRECT`], so the two cannot be told apart.
//! A failing identity provider is a 503, never a redirect.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::auth::{AdminPolicy, AuthError, IdentityProvider, Session};
use crate::error::{AppError, set_sentry_user};

/// Where denied requests are sent.
pub const DENIED_REDIRECT: &str = "/";

/// Outcome of an admin check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The session belongs to an admin.
    Allow(Session),
    /// No session, or a session without admin rights.
    Deny,
}

/// Resolves the session and applies the admin policy.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct AdminGate {
    provider: Arc<dyn IdentityProvider>,
    policy: Arc<dyn AdminPolicy>,
}

impl AdminGate {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, policy: Arc<dyn AdminPolicy>) -> Self {
        Self { provider, policy }
    }

    /// Decide whether the request may enter the admin panel.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the identity provider is unavailable.
    pub async fn evaluate(&self, headers: &HeaderMap) -> Result<GateDecision, AuthError> {
        let Some(session) = self.provider.resolve(headers).await? else {
            debug!(provider = self.provider.name(), "Admin gate: no session");
            return Ok(GateDecision::Deny);
        };

        if self.policy.is_admin(&session) {
            if let Some(user_id) = session.user_id() {
                set_sentry_user(&user_id, session.user.email.as_deref());
            }
            Ok(GateDecision::Allow(session))
        } else {
            debug!(
                provider = self.provider.name(),
                user_id = ?session.user_id(),
                "Admin gate: session is not an admin"
            );
            Ok(GateDecision::Deny)
        }
    }
}

/// Middleware guarding a router: admins pass through, everyone else is
/// redirected before the inner handler runs.
///
/// ```rust,ignore
/// let admin = admin_routes()
///     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
///
/// # Errors
///
/// Returns [`AppError::Auth`] (503) if the identity provider is unavailable.
pub async fn require_admin(
    State(gate): State<AdminGate>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match gate.evaluate(request.headers()).await? {
        GateDecision::Allow(_) => Ok(next.run(request).await),
        GateDecision::Deny => Ok(Redirect::to(DENIED_REDIRECT).into_response()),
    }
}

/// Extractor that requires an admin session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAdmin(session): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", session.user.name.unwrap_or_default())
/// }
/// ```
pub struct RequireAdmin(pub Session);

/// Rejection returned by [`RequireAdmin`].
pub enum AdminRejection {
    /// Anonymous or not an admin.
    Redirect,
    /// Identity provider failure.
    Unavailable(AppError),
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect => Redirect::to(DENIED_REDIRECT).into_response(),
            Self::Unavailable(err) => err.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AdminGate: FromRef<S>,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = AdminGate::from_ref(state);

        match gate.evaluate(&parts.headers).await {
            Ok(GateDecision::Allow(session)) => Ok(Self(session)),
            Ok(GateDecision::Deny) => Err(AdminRejection::Redirect),
            Err(e) => Err(AdminRejection::Unavailable(AppError::from(e))),
        }
    }
}
