//! Unified error handling for the console.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sentry::integrations::tracing::EventFilter;
use thiserror::Error;
use tracing::Level;

/// Application-level error type for the console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Operator is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Operator's role does not grant the permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console request error"
            );
        }

        let status = match &self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Decide how a tracing event reaches Sentry.
///
/// Errors and warnings become events, except warnings from the permission
/// evaluator, which fire on every request for an unmapped role and are kept
/// as breadcrumbs.
#[must_use]
pub fn sentry_event_kind(level: Level, target: &str) -> EventFilter {
    match level {
        Level::WARN if target.starts_with("tenant_console_core") => EventFilter::Breadcrumb,
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Set the Sentry user context from a signed-in operator.
pub fn set_sentry_user(email: &str, role: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
        scope.set_tag("operator.role", role);
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
        scope.remove_tag("operator.role");
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Forbidden("roles:view".to_string());
        assert_eq!(err.to_string(), "Forbidden: roles:view");

        let err = AppError::BadRequest("invalid permission".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid permission");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_session_error_hides_details() {
        let source = serde_json::from_str::<u8>("not json").unwrap_err();
        let response = AppError::from(tower_sessions::session::Error::SerdeJson(source))
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), b"Internal server error");
    }

    #[test]
    fn test_sentry_event_kind() {
        fn kind(level: Level, target: &str) -> u32 {
            sentry_event_kind(level, target).bits()
        }

        let event = EventFilter::Event.bits();
        let breadcrumb = EventFilter::Breadcrumb.bits();

        assert_eq!(kind(Level::WARN, "tenant_console_core::evaluator"), breadcrumb);
        assert_eq!(kind(Level::WARN, "tenant_console::routes::auth"), event);
        assert_eq!(kind(Level::ERROR, "tenant_console_core::evaluator"), event);
        assert_eq!(kind(Level::INFO, "tenant_console::middleware::auth"), breadcrumb);
        assert_eq!(kind(Level::TRACE, "tower_http"), EventFilter::Ignore.bits());
    }
}
