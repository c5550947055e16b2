//! Per-request content scope.
//!
//! [`content_request_scope`] opens one [`ContentRequest`] per inbound request
//! and stores it in the request extensions; the [`ContentRequest`] extractor
//! hands out that same scope, so middleware and handlers share its memo.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::sanity::{ContentClient, ContentRequest};

/// Middleware that opens a content scope for the request.
pub async fn content_request_scope(
    State(client): State<ContentClient>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<ContentRequest>().is_none() {
        request.extensions_mut().insert(client.request());
    }
    next.run(request).await
}

impl<S> FromRequestParts<S> for ContentRequest
where
    S: Send + Sync,
    ContentClient: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(existing) = parts.extensions.get::<Self>() {
            return Ok(existing.clone());
        }

        // Routes mounted without the scope middleware still get a scope.
        let scope = ContentClient::from_ref(state).request();
        parts.extensions.insert(scope.clone());
        Ok(scope)
    }
}
