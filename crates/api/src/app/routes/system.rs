use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use harborcms_auth::{Action, Resource, capabilities as role_capabilities, require_authenticated, require_permission};

use crate::app::{errors::ApiError, services::AppServices};
use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(session): Extension<SessionContext>) -> Result<impl IntoResponse, ApiError> {
    let identity = require_authenticated(&session).await?;
    Ok(Json(json!({
        "id": identity.id.to_string(),
        "email": identity.email,
        "role": identity.role,
    })))
}

/// GET /capabilities - what the current session may do, per resource.
///
/// Advisory data for UI clients that cannot link the auth crate. Anonymous
/// sessions get an all-false snapshot rather than an error.
pub async fn capabilities(Extension(session): Extension<SessionContext>) -> impl IntoResponse {
    let state = session.state();
    Json(json!({
        "session": state,
        "resources": role_capabilities(state.role()),
    }))
}

/// GET /dashboard - record counts per resource the session may view.
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = require_permission(&session, Resource::Dashboard, Action::View, None).await?;

    let counts: serde_json::Map<String, serde_json::Value> = Resource::ALL
        .into_iter()
        .filter(|r| r.is_site_content() || *r == Resource::ContactSubmissions)
        .filter(|r| harborcms_auth::has_permission(identity.role, *r, Action::View))
        .map(|r| (r.as_str().to_string(), json!(services.content.count(r))))
        .collect();

    Ok(Json(json!({ "counts": counts })))
}
