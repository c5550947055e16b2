//! Admin session check.
//!
//! Runs the same gate as `/admin` against a raw cookie header, so an operator
//! can tell whether a session would be let in without opening a browser.
//!
//! # Environment Variables
//!
//! - `AUTH_URL` - Base URL of the identity provider (required)
//! - `ADMIN_ROLES` / `ADMIN_EMAILS` - Admin allowlists

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use notevault_web::auth::{AuthError, ConfiguredAdminPolicy, HttpIdentityProvider};
use notevault_web::config::{AdminAccessConfig, AuthConfig, ConfigError};
use notevault_web::middleware::{AdminGate, DENIED_REDIRECT, GateDecision};
use serde::Serialize;
use thiserror::Error;

use super::emit;

/// Errors that can occur during the session check.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The identity provider could not answer.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// The cookie argument is not a valid header value.
    #[error("Cookie is not a valid header value")]
    InvalidCookie,

    /// Output could not be serialized.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Report<'a> {
    decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'static str>,
}

/// Resolve the session behind `cookie` and print the admin decision.
pub async fn check(cookie: &str) -> Result<(), SessionError> {
    dotenvy::dotenv().ok();

    let auth = AuthConfig::from_env()?;
    let policy = ConfiguredAdminPolicy::from_config(&AdminAccessConfig::from_env());
    let gate = AdminGate::new(Arc::new(HttpIdentityProvider::new(&auth)?), Arc::new(policy));

    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(cookie).map_err(|_| SessionError::InvalidCookie)?,
    );

    match gate.evaluate(&headers).await? {
        GateDecision::Allow(session) => emit(&Report {
            decision: "allow",
            user: session.user_id(),
            redirect: None,
        })?,
        GateDecision::Deny => emit(&Report {
            decision: "deny",
            user: None,
            redirect: Some(DENIED_REDIRECT),
        })?,
    }

    Ok(())
}
