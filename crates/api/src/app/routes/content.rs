//! Generic CRUD over site content and contact submissions.
//!
//! Each handler's first effect is `require_permission` with the same
//! resource/action pair the UI gate for that control uses.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use harborcms_auth::{Action, Resource, require_authenticated, require_permission};
use harborcms_core::RecordId;

use crate::app::{dto, errors::ApiError, services::AppServices};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/:resource", get(list_records).post(create_record))
        .route(
            "/:resource/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

/// Resolve the session before looking at the path, so anonymous callers get
/// 401 regardless of which resource they name.
async fn content_resource(session: &SessionContext, raw: &str) -> Result<Resource, ApiError> {
    require_authenticated(session).await?;
    dto::parse_content_resource(raw)
}

fn record_context(id: &str) -> Option<serde_json::Value> {
    Some(json!({ "record_id": id }))
}

pub async fn list_records(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(resource): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = content_resource(&session, &resource).await?;
    require_permission(&session, resource, Action::View, None).await?;

    let items = services.content.list(resource);
    Ok(Json(json!({ "items": items })))
}

pub async fn get_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = content_resource(&session, &resource).await?;
    require_permission(&session, resource, Action::View, record_context(&id)).await?;

    let id: RecordId = id.parse()?;
    Ok(Json(services.content.get(resource, id)?))
}

pub async fn create_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(resource): Path<String>,
    Json(body): Json<dto::RecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = content_resource(&session, &resource).await?;
    let identity = require_permission(&session, resource, Action::Create, None).await?;

    let record = services.content.create(resource, body.fields, Some(&identity))?;
    tracing::info!(user_id = %identity.id, resource = resource.as_str(), record_id = %record.id, "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<dto::RecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = content_resource(&session, &resource).await?;
    let identity = require_permission(&session, resource, Action::Update, record_context(&id)).await?;

    let id: RecordId = id.parse()?;
    let record = services.content.update(resource, id, body.fields, &identity)?;
    tracing::info!(user_id = %identity.id, resource = resource.as_str(), record_id = %id, "record updated");
    Ok(Json(record))
}

pub async fn delete_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = content_resource(&session, &resource).await?;
    let identity = require_permission(&session, resource, Action::Delete, record_context(&id)).await?;

    let id: RecordId = id.parse()?;
    services.content.delete(resource, id)?;
    tracing::info!(user_id = %identity.id, resource = resource.as_str(), record_id = %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
