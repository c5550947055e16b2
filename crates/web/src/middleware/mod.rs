//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (`http_request` span with status and latency)
//! 3. Request ID (`x-request-id`)
//! 4. Content scope (one [`ContentRequest`](crate::sanity::ContentRequest) per request)
//! 5. Admin gate (`/admin` subtree only)

pub mod auth;
pub mod content;
pub mod request_id;

pub use auth::{AdminGate, AdminRejection, DENIED_REDIRECT, GateDecision, RequireAdmin, require_admin};
pub use content::content_request_scope;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
