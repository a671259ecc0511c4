//! Capability query endpoints.
//!
//! Clients use these to decide what to render; the server still checks
//! every mutation itself.

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tenant_console_core::{Panel, Permission, Role};

use crate::error::AppError;
use crate::middleware::Capabilities;
use crate::state::AppState;

/// The signed-in operator's role and granted permissions.
#[derive(Debug, Serialize)]
pub struct CapabilitiesResponse {
    pub panel: Panel,
    pub role: Role,
    pub known_role: bool,
    pub permissions: Vec<Permission>,
}

/// Permission queries to evaluate. At least one must be present.
///
/// Entries are plain strings; a malformed permission is simply not held.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckRequest {
    pub can: Option<String>,
    pub can_any: Option<Vec<String>>,
    pub can_all: Option<Vec<String>>,
}

/// Results for the queries that were asked.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_any: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_all: Option<bool>,
}

/// Build the capabilities router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/capabilities", get(show))
        .route("/api/capabilities/check", post(check))
}

/// GET /api/capabilities
#[instrument(skip_all)]
async fn show(capabilities: Capabilities) -> Json<CapabilitiesResponse> {
    let evaluator = capabilities.evaluator();
    let operator = capabilities.operator();

    Json(CapabilitiesResponse {
        panel: operator.panel,
        role: operator.role.clone(),
        known_role: evaluator.is_known_role(),
        permissions: evaluator.granted().cloned().collect(),
    })
}

/// POST /api/capabilities/check
#[instrument(skip_all)]
async fn check(
    capabilities: Capabilities,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, AppError> {
    if request.can.is_none() && request.can_any.is_none() && request.can_all.is_none() {
        return Err(AppError::BadRequest(
            "expected at least one of can, can_any, can_all".to_string(),
        ));
    }

    let evaluator = capabilities.evaluator();
    Ok(Json(CheckResponse {
        can: request.can.map(|permission| evaluator.can(&permission)),
        can_any: request.can_any.map(|permissions| evaluator.can_any(permissions)),
        can_all: request.can_all.map(|permissions| evaluator.can_all(permissions)),
    }))
}
