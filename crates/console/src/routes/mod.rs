//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//!
//! # Dashboard
//! GET  /                          - Sections and gated action buttons
//!
//! # Auth (email + access key)
//! GET  /auth/login                - Login page
//! POST /auth/login                - Form login
//! POST /auth/logout               - Logout
//! POST /api/auth/login            - JSON login
//! POST /api/auth/logout           - JSON logout
//!
//! # Capabilities
//! GET  /api/capabilities          - Role and granted permissions
//! POST /api/capabilities/check    - Evaluate can / can_any / can_all
//!
//! # Roles (requires roles:view)
//! GET  /api/roles                 - The panel's permission table
//! ```

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod auth;
pub mod capabilities;
pub mod dashboard;
pub mod roles;

/// Build the complete application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(dashboard::router())
        .merge(auth::router())
        .merge(capabilities::router())
        .merge(roles::router())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
