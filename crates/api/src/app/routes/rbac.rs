//! RBAC audit endpoints for transparent authorization debugging.
//!
//! These expose policy only (roles, resources, grants), never other users'
//! identities.

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use harborcms_auth::{RbacRegistry, explain_permission, require_authenticated};

use crate::app::{dto, errors::ApiError};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/matrix", get(matrix))
        .route("/explain", get(explain))
}

/// GET /rbac/matrix - every role and its grants.
pub async fn matrix(Extension(session): Extension<SessionContext>) -> Result<impl IntoResponse, ApiError> {
    require_authenticated(&session).await?;
    Ok(Json(json!({ "registry": RbacRegistry::new() })))
}

/// GET /rbac/explain?resource=X&action=Y - why the current session can/cannot.
pub async fn explain(
    Extension(session): Extension<SessionContext>,
    Query(query): Query<dto::ExplainQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = require_authenticated(&session).await?;
    let resource = dto::parse_resource(&query.resource)?;
    let action = dto::parse_action(&query.action)?;

    let explanation = explain_permission(identity.role, resource, action);
    Ok(Json(json!({ "explanation": explanation })))
}
