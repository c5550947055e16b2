//! Session resolution error types.

use thiserror::Error;

/// Errors that can occur while resolving a session.
///
/// "No session" is not an error; resolvers return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider could not be reached, failed, or answered with
    /// something that is not a session.
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::ProviderUnavailable(err.to_string())
    }
}

impl From<tower_sessions::session_store::Error> for AuthError {
    fn from(err: tower_sessions::session_store::Error) -> Self {
        Self::ProviderUnavailable(format!("session store: {err}"))
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::ProviderUnavailable(format!("undecodable session: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AuthError::ProviderUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "identity provider unavailable: connection refused"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AuthError::from(json_err);
        assert!(err.to_string().contains("undecodable session"));
    }
}
