//! HTTP middleware and extractors for the console.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Session layer (tower-sessions, in-memory store)
//!
//! Authorization happens in extractors, not layers: [`RequireOperator`]
//! for sign-in and [`Capabilities`] for permission checks.

pub mod auth;
pub mod session;

pub use auth::{
    AuthRejection, Capabilities, OptionalOperator, RequireOperator, clear_current_operator,
    set_current_operator,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
