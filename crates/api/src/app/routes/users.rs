//! User directory and role management.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;

use harborcms_auth::{Action, Resource, require_permission};
use harborcms_core::UserId;

use crate::app::{dto, errors::ApiError, services::AppServices};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/role", put(assign_role))
}

/// GET /users
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, ApiError> {
    require_permission(&session, Resource::Users, Action::View, None).await?;
    Ok(Json(json!({ "users": services.users.list() })))
}

/// PUT /users/:id/role
pub async fn assign_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AssignRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = require_permission(
        &session,
        Resource::Users,
        Action::ManageRoles,
        Some(json!({ "target_user_id": id, "requested_role": body.role })),
    )
    .await?;

    let target: UserId = id.parse()?;
    let role = dto::parse_role(body.role.as_deref())?;
    let user = services.users.assign_role(&actor, target, role)?;
    Ok(Json(json!({ "user": user })))
}
