//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SANITY_PROJECT_ID` - Sanity project ID (lowercase alphanumerics)
//! - `AUTH_URL` - Base URL of the Auth.js-compatible identity provider
//!
//! ## Optional
//! - `NOTEVAULT_HOST` - Bind address (default: 127.0.0.1)
//! - `NOTEVAULT_PORT` - Listen port (default: 3000)
//! - `SANITY_DATASET` - Dataset name (default: production)
//! - `SANITY_API_VERSION` - API version date (default: 2023-05-03)
//! - `SANITY_USE_CDN` - Read through the API CDN (default: false)
//! - `SANITY_API_HOST` - Override the API host (e.g. for a local proxy)
//! - `SANITY_READ_TOKEN` - Token for private datasets
//! - `SANITY_WRITE_TOKEN` - Token for mutations (view counter)
//! - `CONTENT_REVALIDATE_SECONDS` - Max age of cached query results (default: 3600, 0 disables)
//! - `CONTENT_CACHE_CAPACITY` - Max cached query results (default: 1000)
//! - `AUTH_SESSION_COOKIES` - Comma separated session cookie names
//! - `ADMIN_ROLES` - Comma separated roles granted admin access (default: admin)
//! - `ADMIN_EMAILS` - Comma separated emails granted admin access
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use notevault_core::UserRole;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const MAX_DATASET_LENGTH: usize = 64;

/// Default Sanity API version.
pub const DEFAULT_API_VERSION: &str = "2023-05-03";

/// Session cookie names set by Auth.js (HTTPS and plain HTTP variants).
pub const DEFAULT_SESSION_COOKIES: &[&str] =
    &["__Secure-authjs.session-token", "authjs.session-token"];

/// Path of the session endpoint below `AUTH_URL`.
const SESSION_ENDPOINT_PATH: &str = "api/auth/session";

/// Timeout for a single session lookup.
const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sanity content store configuration
    pub sanity: SanityConfig,
    /// Query result cache configuration
    pub content_cache: ContentCacheConfig,
    /// Identity provider configuration
    pub auth: AuthConfig,
    /// Who counts as an admin
    pub admin: AdminAccessConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Sanity content store configuration.
///
/// Implements `Debug` manually to redact tokens.
#[derive(Clone)]
pub struct SanityConfig {
    /// Project ID (e.g. `abc123xy`)
    pub project_id: String,
    /// Dataset name
    pub dataset: String,
    /// API version date, without the leading `v`
    pub api_version: String,
    /// Read through `apicdn.sanity.io` instead of `api.sanity.io`
    pub use_cdn: bool,
    /// Host override, including scheme
    pub api_host: Option<String>,
    /// Read token for private datasets
    pub read_token: Option<SecretString>,
    /// Write token for mutations
    pub write_token: Option<SecretString>,
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("use_cdn", &self.use_cdn)
            .field("api_host", &self.api_host)
            .field("read_token", &self.read_token.as_ref().map(|_| "[REDACTED]"))
            .field("write_token", &self.write_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SanityConfig {
    /// Host used for queries.
    #[must_use]
    pub fn query_host(&self) -> String {
        self.host(self.use_cdn)
    }

    /// Host used for mutations. Mutations never go through the CDN.
    #[must_use]
    pub fn mutation_host(&self) -> String {
        self.host(false)
    }

    fn host(&self, cdn: bool) -> String {
        self.api_host.as_ref().map_or_else(
            || {
                let subdomain = if cdn { "apicdn" } else { "api" };
                format!("https://{}.{subdomain}.sanity.io", self.project_id)
            },
            |host| host.trim_end_matches('/').to_string(),
        )
    }
}

/// Query result cache configuration.
#[derive(Debug, Clone, Copy)]
pub struct ContentCacheConfig {
    /// Maximum age of a cached result; zero disables the cache
    pub revalidate: Duration,
    /// Maximum number of cached results
    pub capacity: u64,
}

impl Default for ContentCacheConfig {
    fn default() -> Self {
        Self {
            revalidate: Duration::from_secs(3600),
            capacity: 1000,
        }
    }
}

/// Identity provider configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Full URL of the session endpoint
    pub session_url: Url,
    /// Cookie names that carry the session token
    pub session_cookies: Vec<String>,
    /// Timeout for a single lookup
    pub timeout: Duration,
}

impl AuthConfig {
    /// Build a configuration for an identity provider at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            session_url: base.join(SESSION_ENDPOINT_PATH)?,
            session_cookies: DEFAULT_SESSION_COOKIES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            timeout: DEFAULT_AUTH_TIMEOUT,
        })
    }
}

/// Who counts as an admin.
#[derive(Debug, Clone)]
pub struct AdminAccessConfig {
    /// Roles that grant admin access
    pub roles: Vec<UserRole>,
    /// Emails that grant admin access, lowercased
    pub emails: Vec<String>,
}

impl Default for AdminAccessConfig {
    fn default() -> Self {
        Self {
            roles: vec![UserRole::Admin],
            emails: Vec::new(),
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if tokens fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("NOTEVAULT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("NOTEVAULT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("NOTEVAULT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("NOTEVAULT_PORT".to_string(), e.to_string()))?;

        let sanity = SanityConfig::from_env()?;
        let content_cache = ContentCacheConfig::from_env()?;
        let auth = AuthConfig::from_env()?;
        let admin = AdminAccessConfig::from_env();

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            sanity,
            content_cache,
            auth,
            admin,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SanityConfig {
    /// Load the Sanity section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the project ID or dataset are missing or
    /// malformed, or if a token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = get_required_env("SANITY_PROJECT_ID")?;
        validate_project_id(&project_id)?;

        let dataset = get_env_or_default("SANITY_DATASET", "production");
        validate_dataset(&dataset)?;

        let api_version = get_env_or_default("SANITY_API_VERSION", DEFAULT_API_VERSION)
            .trim_start_matches('v')
            .to_string();

        let use_cdn = parse_bool(
            "SANITY_USE_CDN",
            &get_env_or_default("SANITY_USE_CDN", "false"),
        )?;

        Ok(Self {
            project_id,
            dataset,
            api_version,
            use_cdn,
            api_host: get_optional_env("SANITY_API_HOST"),
            read_token: get_optional_validated_secret("SANITY_READ_TOKEN")?,
            write_token: get_optional_validated_secret("SANITY_WRITE_TOKEN")?,
        })
    }
}

impl ContentCacheConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let revalidate = get_env_or_default("CONTENT_REVALIDATE_SECONDS", "3600")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CONTENT_REVALIDATE_SECONDS".to_string(), e.to_string())
            })?;
        let capacity = get_env_or_default("CONTENT_CACHE_CAPACITY", "1000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CONTENT_CACHE_CAPACITY".to_string(), e.to_string())
            })?;

        Ok(Self {
            revalidate: Duration::from_secs(revalidate),
            capacity,
        })
    }
}

impl AuthConfig {
    /// Load the identity provider section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `AUTH_URL` is missing or not a URL, or if
    /// `AUTH_SESSION_COOKIES` names no cookie.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("AUTH_URL")?;
        let mut config = Self::for_base_url(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("AUTH_URL".to_string(), e.to_string()))?;

        if let Some(names) = get_optional_env("AUTH_SESSION_COOKIES") {
            let names = parse_list(&names);
            if names.is_empty() {
                return Err(ConfigError::InvalidEnvVar(
                    "AUTH_SESSION_COOKIES".to_string(),
                    "must name at least one cookie".to_string(),
                ));
            }
            config.session_cookies = names;
        }

        Ok(config)
    }
}

impl AdminAccessConfig {
    /// Load the admin allowlists. Defaults to the `admin` role only.
    #[must_use]
    pub fn from_env() -> Self {
        let roles = get_optional_env("ADMIN_ROLES").map_or_else(
            || vec![UserRole::Admin],
            |s| parse_list(&s).into_iter().map(UserRole::from).collect(),
        );
        let emails = get_optional_env("ADMIN_EMAILS")
            .map(|s| {
                parse_list(&s)
                    .into_iter()
                    .map(|e| e.to_lowercase())
                    .collect()
            })
            .unwrap_or_default();

        Self { roles, emails }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Split a comma separated list, dropping empty entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}

/// Sanity project IDs are lowercase alphanumerics.
fn validate_project_id(project_id: &str) -> Result<(), ConfigError> {
    if project_id.is_empty()
        || !project_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(ConfigError::InvalidEnvVar(
            "SANITY_PROJECT_ID".to_string(),
            "must contain only lowercase letters and digits".to_string(),
        ));
    }
    Ok(())
}

/// Dataset names are lowercase alphanumerics, `_` and `-`, at most 64 chars.
fn validate_dataset(dataset: &str) -> Result<(), ConfigError> {
    let valid_chars = dataset
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

    if dataset.is_empty() || dataset.len() > MAX_DATASET_LENGTH || !valid_chars {
        return Err(ConfigError::InvalidEnvVar(
            "SANITY_DATASET".to_string(),
            format!(
                "must be 1-{MAX_DATASET_LENGTH} lowercase letters, digits, '_' or '-'"
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a token is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the token from the Sanity project settings."
            ),
        ));
    }

    Ok(())
}

/// Load and validate an optional token from environment.
fn get_optional_validated_secret(key: &str) -> Result<Option<SecretString>, ConfigError> {
    get_optional_env(key)
        .map(|value| {
            validate_secret_strength(&value, key)?;
            Ok(SecretString::from(value))
        })
        .transpose()
}
