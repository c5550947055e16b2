//! Integration tests for NoteVault.
//!
//! Each test drives the full application router in-process. The Sanity
//! content API and the identity provider are replaced by `wiremock` servers,
//! so no network access or credentials are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p notevault-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_gate` - Session resolution and admin redirects
//! - `note_pages` - Public note pages, view counting and caching
//! - `health` - Liveness and readiness

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use notevault_core::UserRole;
use notevault_web::config::{
    AdminAccessConfig, AuthConfig, ContentCacheConfig, SanityConfig, WebConfig,
};
use notevault_web::routes;
use notevault_web::state::AppState;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Query endpoint path for the test dataset.
pub const QUERY_PATH: &str = "/v2023-05-03/data/query/production";

/// Mutation endpoint path for the test dataset.
pub const MUTATE_PATH: &str = "/v2023-05-03/data/mutate/production";

/// Session endpoint path on the identity provider.
pub const SESSION_PATH: &str = "/api/auth/session";

/// A cookie header carrying an Auth.js session token.
pub const SESSION_COOKIE: &str = "authjs.session-token=test-session-token";

/// Email on the admin allowlist.
pub const ALLOWLISTED_EMAIL: &str = "owner@notevault.test";

/// The application under test plus its mocked upstreams.
pub struct TestContext {
    /// Stands in for the Sanity content API.
    pub sanity: MockServer,
    /// Stands in for the Auth.js session endpoint.
    pub auth: MockServer,
    app: Router,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestContext {
    /// Start the mock upstreams and build the app with default settings.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestContext::new`], letting the test adjust the configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut WebConfig)) -> Self {
        let sanity = MockServer::start().await;
        let auth = MockServer::start().await;

        let mut config = test_config(&sanity, &auth);
        adjust(&mut config);

        let state = AppState::new(&config).expect("Failed to build app state");
        Self {
            sanity,
            auth,
            app: routes::router(state),
        }
    }

    /// Send a GET request without cookies.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a GET request with a `Cookie` header.
    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        self.send(Method::GET, uri, Some(cookie)).await
    }

    /// Send an empty POST request.
    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(Body::empty()).expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Answer session lookups with `body`.
    pub async fn mount_session(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(SESSION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.auth)
            .await;
    }

    /// Answer session lookups with a bare status code.
    pub async fn mount_session_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(SESSION_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.auth)
            .await;
    }

    /// Answer every content query with `result`, expecting `times` calls.
    pub async fn mount_query(&self, result: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ms": 1, "result": result})),
            )
            .expect(times)
            .mount(&self.sanity)
            .await;
    }

    /// Answer the query for the note with `slug`, expecting `times` calls.
    pub async fn mount_note(&self, slug: &str, result: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("$slug", format!("\"{slug}\"")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ms": 1, "result": result})),
            )
            .expect(times)
            .mount(&self.sanity)
            .await;
    }

    /// Fail every content query with `status`.
    pub async fn mount_query_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"description": "backend unavailable", "type": "internalError"}
            })))
            .mount(&self.sanity)
            .await;
    }

    /// Accept mutations, expecting `times` calls.
    pub async fn mount_mutate(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path(MUTATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionId": "tx-1",
                "results": [{"id": "note-os", "operation": "update"}]
            })))
            .expect(times)
            .mount(&self.sanity)
            .await;
    }
}

/// Configuration pointing at the mock upstreams.
///
/// Revalidation defaults to one hour; admin access is the `admin` role plus
/// [`ALLOWLISTED_EMAIL`].
#[must_use]
pub fn test_config(sanity: &MockServer, auth: &MockServer) -> WebConfig {
    WebConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        sanity: SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2023-05-03".to_string(),
            use_cdn: false,
            api_host: Some(sanity.uri()),
            read_token: None,
            write_token: Some(SecretString::from("sk-test-write-token".to_string())),
        },
        content_cache: ContentCacheConfig {
            revalidate: Duration::from_secs(3600),
            capacity: 100,
        },
        auth: AuthConfig::for_base_url(&auth.uri()).expect("Mock server URI is a URL"),
        admin: AdminAccessConfig {
            roles: vec![UserRole::Admin],
            emails: vec![ALLOWLISTED_EMAIL.to_string()],
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// An Auth.js session body for a user with `role`.
#[must_use]
pub fn session_body(email: &str, role: Option<&str>) -> Value {
    json!({
        "user": {
            "id": "user-1",
            "name": "Ada Lovelace",
            "email": email,
            "role": role
        },
        "expires": "2099-01-01T00:00:00.000Z"
    })
}

/// The `intro-to-os` note as the note query projects it.
#[must_use]
pub fn intro_to_os() -> Value {
    json!({
        "_id": "note-os",
        "title": "Introduction to Operating Systems",
        "syllabus": "Processes, threads and virtual memory",
        "slug": "intro-to-os",
        "views": 41,
        "university": "MIT",
        "degree": "BSc Computer Science",
        "year": 2,
        "semester": "1",
        "subject": "Operating Systems",
        "content": [
            {
                "_type": "block",
                "style": "h2",
                "children": [{"_type": "span", "text": "Scheduling", "marks": []}]
            },
            {
                "_type": "block",
                "style": "normal",
                "children": [{"_type": "span", "text": "Round robin gives each process a quantum.", "marks": []}]
            },
            {
                "_type": "callout",
                "text": "Not rendered"
            }
        ]
    })
}
