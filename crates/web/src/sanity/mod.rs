//! Sanity content store client.
//!
//! # Architecture
//!
//! - Every read goes through a named [`QueryDefinition`]: a GROQ query plus
//!   typed parameters and a typed result
//! - Parameters are sent as bound `$name` arguments, never spliced into the
//!   query text
//! - Sanity is the source of truth - no local copies, direct API calls
//! - Results are cached process-wide with a revalidation interval (default
//!   one hour) and deduplicated per request via [`ContentRequest`]
//!
//! # Example
//!
//! ```rust,ignore
//! use notevault_core::Slug;
//! use notevault_web::sanity::ContentClient;
//!
//! let client = ContentClient::new(&config.sanity, &config.content_cache)?;
//!
//! // One request scope per inbound HTTP request
//! let content = client.request();
//! let note = content.note_by_slug(&Slug::parse("intro-to-os")?).await?;
//! ```

mod client;
pub mod types;

pub use client::queries::{self, QueryDefinition, QueryRequest};
pub use client::{ContentClient, ContentRequest};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the Sanity APIs.
///
/// A query that matches no document is not an error; it yields `None` or an
/// empty list.
#[derive(Debug, Error)]
pub enum SanityError {
    /// HTTP request failed (connection refused, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request.
    #[error("Sanity API error (HTTP {status}): {}", format_api_error(.kind.as_deref(), .description))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanity error type (e.g. `queryParseError`), when reported.
        kind: Option<String>,
        /// Human readable description.
        description: String,
    },

    /// Response body could not be decoded into the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Sanity.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Query parameters failed validation before being sent.
    #[error("Invalid query parameters: {0}")]
    InvalidParams(String),

    /// Endpoint URL could not be built from configuration.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// A mutation was attempted without a write token.
    #[error("No Sanity write token configured")]
    MissingWriteToken,
}

fn format_api_error(kind: Option<&str>, description: &str) -> String {
    let description = if description.is_empty() {
        "(no error details provided)"
    } else {
        description
    };

    match kind {
        Some(kind) if !kind.is_empty() => format!("{kind}: {description}"),
        _ => description.to_string(),
    }
}
