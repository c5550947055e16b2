//! Identity provider backed by an Auth.js-compatible session endpoint.

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode, header};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::{AuthError, IdentityProvider, Session, session_cookies};
use crate::config::AuthConfig;

/// Resolves sessions by forwarding the request's session cookies to
/// `GET {AUTH_URL}/api/auth/session`.
///
/// The endpoint answers `{}` or `null` for anonymous requests and
/// `{ "user": {..}, "expires": ".." }` otherwise.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    session_url: Url,
    cookie_names: Vec<String>,
}

impl HttpIdentityProvider {
    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            session_url: config.session_url.clone(),
            cookie_names: config.session_cookies.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    fn name(&self) -> &str {
        "authjs"
    }

    #[instrument(skip(self, headers), fields(provider = "authjs"))]
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, AuthError> {
        let cookies = session_cookies(headers, &self.cookie_names);
        if cookies.is_empty() {
            debug!("No session cookie on request");
            return Ok(None);
        }

        let cookie_header = cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        let response = self
            .client
            .get(self.session_url.clone())
            .header(header::COOKIE, cookie_header)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(status = %status, "Identity provider rejected session");
            return Ok(None);
        }
        if !status.is_success() {
            tracing::error!(status = %status, "Identity provider returned non-success status");
            return Err(AuthError::ProviderUnavailable(format!(
                "session endpoint returned HTTP {status}"
            )));
        }

        let body = response.text().await?;
        parse_session_body(&body)
    }
}

/// Decode a session endpoint body. `{}`, `null` and objects without a user
/// are anonymous; an expired session is treated the same way.
fn parse_session_body(body: &str) -> Result<Option<Session>, AuthError> {
    let value: Value = serde_json::from_str(body)?;

    let has_user = value.get("user").is_some_and(|user| !user.is_null());
    if !has_user {
        return Ok(None);
    }

    let session: Session = serde_json::from_value(value)?;
    if session.is_expired(Utc::now()) {
        debug!("Identity provider returned an expired session");
        return Ok(None);
    }

    Ok(Some(session))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use notevault_core::UserRole;
    use serde_json::json;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> HttpIdentityProvider {
        HttpIdentityProvider::new(&AuthConfig::for_base_url(&server.uri()).unwrap()).unwrap()
    }

    fn cookie_headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_parse_empty_object_is_anonymous() {
        assert!(parse_session_body("{}").unwrap().is_none());
        assert!(parse_session_body("null").unwrap().is_none());
        assert!(parse_session_body(r#"{"user":null}"#).unwrap().is_none());
    }

    #[test]
    fn test_parse_expired_session_is_anonymous() {
        let body = json!({
            "user": {"email": "ada@notevault.dev"},
            "expires": "2001-01-01T00:00:00Z"
        });
        assert!(parse_session_body(&body.to_string()).unwrap().is_none());
    }

    #[test]
    fn test_parse_garbage_is_provider_failure() {
        let err = parse_session_body("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AuthError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_no_cookie_skips_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let session = provider(&server).resolve(&HeaderMap::new()).await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_forwards_only_session_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/session"))
            .and(header_matcher("cookie", "authjs.session-token=tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": "u1", "email": "ada@notevault.dev", "role": "admin"},
                "expires": "2099-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = provider(&server)
            .resolve(&cookie_headers("theme=dark; authjs.session-token=tok123"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(session.user_id(), Some("u1"));
        assert_eq!(session.user.role, Some(UserRole::Admin));
    }

    #[tokio::test]
    async fn test_anonymous_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let session = provider(&server)
            .resolve(&cookie_headers("authjs.session-token=stale"))
            .await
            .unwrap();

        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_is_anonymous() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = provider(&server)
            .resolve(&cookie_headers("authjs.session-token=stale"))
            .await
            .unwrap();

        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_provider_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = provider(&server)
            .resolve(&cookie_headers("authjs.session-token=tok"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::ProviderUnavailable(_)));
    }
}
