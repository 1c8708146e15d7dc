use serde::Deserialize;

use harborcms_auth::{Action, Resource, Role};

use crate::app::errors::ApiError;
use crate::app::services::Fields;

// -------------------------
// Request DTOs
// -------------------------

/// Body for create/update: arbitrary record fields.
#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub fields: Fields,
}

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    /// Wire name of the new role, or `null` to clear it.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub resource: String,
    pub action: String,
}

// -------------------------
// Parsing helpers
// -------------------------

/// Resources managed through the generic `/content` routes.
pub fn parse_content_resource(s: &str) -> Result<Resource, ApiError> {
    match Resource::parse(s) {
        Some(r) if r.is_site_content() || r == Resource::ContactSubmissions => Ok(r),
        Some(r) => Err(ApiError::BadRequest(format!(
            "{} is not managed through /content",
            r.label()
        ))),
        None => Err(ApiError::BadRequest(format!("unknown resource '{s}'"))),
    }
}

pub fn parse_resource(s: &str) -> Result<Resource, ApiError> {
    s.parse::<Resource>().map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub fn parse_action(s: &str) -> Result<Action, ApiError> {
    s.parse::<Action>().map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Explicit role parsing for admin input: unknown names are a client error here,
/// unlike session claims where they collapse to "no role".
pub fn parse_role(s: Option<&str>) -> Result<Option<Role>, ApiError> {
    s.map(|raw| raw.parse::<Role>().map_err(|e| ApiError::BadRequest(e.to_string())))
        .transpose()
}
