//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page (admin denials redirect here)
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (queries the content store)
//!
//! # Notes
//! GET  /notes/{slug}           - Note page
//! POST /notes/{slug}/view      - Count a view (204)
//!
//! # Admin (requires admin session, otherwise 303 to /)
//! GET  /admin                  - Dashboard
//! GET  /admin/coupons          - Coupons shell
//! GET  /admin/flashcards       - Flashcards shell
//! GET  /admin/notes            - Notes shell (hydrated)
//! GET  /admin/premium          - Premium shell
//! GET  /admin/quizzes          - Quizzes shell
//! ```

pub mod admin;
pub mod health;
pub mod home;
pub mod notes;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::middleware::{content_request_scope, require_admin};
use crate::state::AppState;

/// Create the admin routes router (without the gate).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/coupons", get(admin::coupons))
        .route("/flashcards", get(admin::flashcards))
        .route("/notes", get(admin::notes))
        .route("/premium", get(admin::premium))
        .route("/quizzes", get(admin::quizzes))
}

/// Create the public note routes router.
pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(notes::show))
        .route("/{slug}/view", post(notes::record_view))
}

/// Create the full application router.
pub fn router(state: AppState) -> Router {
    let admin = admin_routes().route_layer(from_fn_with_state(
        state.admin_gate().clone(),
        require_admin,
    ));

    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/notes", note_routes())
        .nest("/admin", admin)
        .layer(from_fn_with_state(
            state.content().clone(),
            content_request_scope,
        ))
        .with_state(state)
}
