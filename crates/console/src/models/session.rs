//! Session-related types for operator authentication.

use serde::{Deserialize, Serialize};

use tenant_console_core::{Panel, Role};

use super::operator::Operator;

/// Session-stored operator identity.
///
/// Written on login, read on every gated render, removed on logout. The
/// role is fixed for the life of the session; a role change takes effect on
/// the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentOperator {
    /// Operator's login email.
    pub email: String,
    /// Operator's display name.
    pub name: String,
    /// Panel the operator signed in to.
    pub panel: Panel,
    /// Role issued at login.
    pub role: Role,
}

impl From<&Operator> for CurrentOperator {
    fn from(operator: &Operator) -> Self {
        Self {
            email: operator.email.clone(),
            name: operator.name.clone(),
            panel: operator.panel,
            role: operator.role.clone(),
        }
    }
}

/// Session keys for operator authentication data.
pub mod keys {
    /// Key for storing the current logged-in operator.
    pub const CURRENT_OPERATOR: &str = "current_operator";
}
