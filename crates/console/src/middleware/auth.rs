//! Authentication and capability extractors for the console.
//!
//! [`RequireOperator`] gates a route on a signed-in operator.
//! [`Capabilities`] additionally binds the operator's role to their panel's
//! permission table, so handlers can check permissions before acting.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use tenant_console_core::{Evaluator, Permission, PermissionTable};

use crate::error::AppError;
use crate::models::{CurrentOperator, session_keys};
use crate::state::AppState;

/// Extractor that requires a signed-in operator.
///
/// If nobody is signed in, returns a redirect to the login page for HTML
/// requests, or 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireOperator(operator): RequireOperator,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", operator.name)
/// }
/// ```
pub struct RequireOperator(pub CurrentOperator);

/// Error returned when a signed-in operator is required.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireOperator
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let operator: CurrentOperator = session
            .get(session_keys::CURRENT_OPERATOR)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                if parts.uri.path().starts_with("/api/") {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(operator))
    }
}

/// Extractor that optionally gets the current operator.
///
/// Unlike `RequireOperator`, this does not reject the request when nobody is
/// signed in.
pub struct OptionalOperator(pub Option<CurrentOperator>);

impl<S> FromRequestParts<S> for OptionalOperator
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let operator = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentOperator>(session_keys::CURRENT_OPERATOR)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(operator))
    }
}

/// Signed-in operator together with their panel's permission table.
///
/// # Example
///
/// ```rust,ignore
/// async fn delete_plan(capabilities: Capabilities) -> Result<StatusCode, AppError> {
///     capabilities.require(&permissions::PLANS_DELETE)?;
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct Capabilities {
    operator: CurrentOperator,
    table: Arc<PermissionTable>,
}

impl Capabilities {
    /// Bind an operator to a permission table.
    #[must_use]
    pub const fn new(operator: CurrentOperator, table: Arc<PermissionTable>) -> Self {
        Self { operator, table }
    }

    /// The signed-in operator.
    #[must_use]
    pub const fn operator(&self) -> &CurrentOperator {
        &self.operator
    }

    /// Permission table of the operator's panel.
    #[must_use]
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Evaluator for the operator's role.
    #[must_use]
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(Some(&self.operator.role), &self.table)
    }

    /// Require `permission`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` if the operator's role does not hold it.
    pub fn require(&self, permission: &Permission) -> Result<(), AppError> {
        if self.evaluator().can(permission) {
            return Ok(());
        }

        tracing::info!(
            operator = %self.operator.email,
            panel = %self.operator.panel,
            role = %self.operator.role,
            permission = %permission,
            "Permission denied"
        );
        Err(AppError::Forbidden(permission.to_string()))
    }
}

impl FromRequestParts<AppState> for Capabilities {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireOperator(operator) = RequireOperator::from_request_parts(parts, state).await?;
        let table = Arc::clone(state.policies().table(operator.panel));
        Ok(Self::new(operator, table))
    }
}

/// Helper to set the current operator in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_operator(
    session: &Session,
    operator: &CurrentOperator,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_OPERATOR, operator)
        .await
}

/// Helper to clear the current operator from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_operator(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentOperator>(session_keys::CURRENT_OPERATOR)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tenant_console_core::{Panel, Role, catalog, catalog::permissions};

    use super::*;

    fn capabilities(panel: Panel, role: &str) -> Capabilities {
        let table = match panel {
            Panel::Admin => catalog::admin_panel(),
            Panel::Vendor => catalog::vendor_panel(),
        };
        Capabilities::new(
            CurrentOperator {
                email: "ops@example.com".to_string(),
                name: "Ops".to_string(),
                panel,
                role: Role::new(role),
            },
            Arc::new(table),
        )
    }

    #[test]
    fn test_require_granted() {
        let capabilities = capabilities(Panel::Admin, "admin");
        assert!(capabilities.require(&permissions::PLANS_DELETE).is_ok());
    }

    #[test]
    fn test_require_denied_is_forbidden() {
        let capabilities = capabilities(Panel::Admin, "viewer");
        let err = capabilities.require(&permissions::PLANS_DELETE).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref p) if p == "plans:delete"));
    }

    #[test]
    fn test_unknown_role_denied() {
        let capabilities = capabilities(Panel::Vendor, "ghost");
        assert!(!capabilities.evaluator().is_known_role());
        assert!(capabilities.require(&permissions::CARDS_VIEW).is_err());
    }
}
