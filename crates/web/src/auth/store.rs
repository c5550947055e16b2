//! Identity provider backed by a local `tower-sessions` store.

use std::slice;

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use tower_sessions::SessionStore;
use tower_sessions::session::Id;
use tracing::{debug, instrument};

use super::{AuthError, IdentityProvider, Session, SessionUser, session_cookies};

/// Session data key holding the signed-in [`SessionUser`].
pub const CURRENT_USER_KEY: &str = "current_user";

/// Default cookie carrying the session id.
pub const DEFAULT_STORE_COOKIE: &str = "notevault_session";

/// Resolves the session id cookie against a session store and reads the
/// user stored under [`CURRENT_USER_KEY`].
#[derive(Debug, Clone)]
pub struct StoreIdentityProvider<S> {
    store: S,
    cookie_name: String,
}

impl<S: SessionStore> StoreIdentityProvider<S> {
    pub fn new(store: S, cookie_name: impl Into<String>) -> Self {
        Self {
            store,
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait]
impl<S: SessionStore> IdentityProvider for StoreIdentityProvider<S> {
    fn name(&self) -> &str {
        "session-store"
    }

    #[instrument(skip(self, headers), fields(provider = "session-store"))]
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, AuthError> {
        let Some((_, raw_id)) = session_cookies(headers, slice::from_ref(&self.cookie_name))
            .into_iter()
            .next()
        else {
            return Ok(None);
        };

        let Ok(id) = raw_id.parse::<Id>() else {
            debug!("Ignoring malformed session id");
            return Ok(None);
        };

        let Some(record) = self.store.load(&id).await? else {
            return Ok(None);
        };

        let expires = DateTime::<Utc>::from_timestamp(record.expiry_date.unix_timestamp(), 0);
        if expires.is_some_and(|expires| expires <= Utc::now()) {
            return Ok(None);
        }

        let Some(user) = record.data.get(CURRENT_USER_KEY) else {
            return Ok(None);
        };
        let user: SessionUser = serde_json::from_value(user.clone())?;

        Ok(Some(Session { user, expires }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use axum::http::{HeaderValue, header};
    use notevault_core::UserRole;
    use serde_json::json;
    use tower_sessions::MemoryStore;
    use tower_sessions::cookie::time::{Duration, OffsetDateTime};
    use tower_sessions::session::Record;

    async fn store_with(data: HashMap<String, serde_json::Value>, ttl: Duration) -> (MemoryStore, Id) {
        let store = MemoryStore::default();
        let mut record = Record {
            id: Id::default(),
            data,
            expiry_date: OffsetDateTime::now_utc() + ttl,
        };
        store.create(&mut record).await.unwrap();
        (store, record.id)
    }

    fn headers_for(id: &Id) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{DEFAULT_STORE_COOKIE}={id}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_resolves_current_user() {
        let mut data = HashMap::new();
        data.insert(
            CURRENT_USER_KEY.to_string(),
            json!({"id": "u1", "email": "ada@notevault.dev", "role": "admin"}),
        );
        let (store, id) = store_with(data, Duration::hours(1)).await;
        let provider = StoreIdentityProvider::new(store, DEFAULT_STORE_COOKIE);

        let session = provider.resolve(&headers_for(&id)).await.unwrap().unwrap();

        assert_eq!(session.user_id(), Some("u1"));
        assert_eq!(session.user.role, Some(UserRole::Admin));
        assert!(session.expires.is_some());
    }

    #[tokio::test]
    async fn test_record_without_user_is_anonymous() {
        let (store, id) = store_with(HashMap::new(), Duration::hours(1)).await;
        let provider = StoreIdentityProvider::new(store, DEFAULT_STORE_COOKIE);

        assert!(provider.resolve(&headers_for(&id)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_id_is_anonymous() {
        let provider = StoreIdentityProvider::new(MemoryStore::default(), DEFAULT_STORE_COOKIE);

        assert!(provider.resolve(&headers_for(&Id::default())).await.unwrap().is_none());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("notevault_session=not-a-session-id"),
        );
        assert!(provider.resolve(&headers).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_cookie_is_anonymous() {
        let provider = StoreIdentityProvider::new(MemoryStore::default(), DEFAULT_STORE_COOKIE);
        assert!(provider.resolve(&HeaderMap::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_user_is_provider_failure() {
        let mut data = HashMap::new();
        data.insert(CURRENT_USER_KEY.to_string(), json!("not an object"));
        let (store, id) = store_with(data, Duration::hours(1)).await;
        let provider = StoreIdentityProvider::new(store, DEFAULT_STORE_COOKIE);

        let err = provider.resolve(&headers_for(&id)).await.unwrap_err();
        assert!(matches!(err, AuthError::ProviderUnavailable(_)));
    }
}
