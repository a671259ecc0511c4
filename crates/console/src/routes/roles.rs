//! Role listing for the operator's panel.

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::instrument;

use tenant_console_core::{Panel, PermissionTable, catalog::permissions};

use crate::error::AppError;
use crate::middleware::Capabilities;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub panel: Panel,
    pub roles: PermissionTable,
}

/// Build the roles router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/roles", get(index))
}

/// GET /api/roles
#[instrument(skip_all)]
async fn index(capabilities: Capabilities) -> Result<Json<RolesResponse>, AppError> {
    capabilities.require(&permissions::ROLES_VIEW)?;

    Ok(Json(RolesResponse {
        panel: capabilities.operator().panel,
        roles: capabilities.table().clone(),
    }))
}
