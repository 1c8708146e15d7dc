use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use harborcms_auth::TokenValidator;

use crate::app::services::AppServices;
use crate::context::SessionContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenValidator>,
    pub services: Arc<AppServices>,
}

/// Resolve the request's session and attach it as an extension.
///
/// Never rejects: a missing or invalid token yields an anonymous session, and
/// the guard in each handler produces the 401.
pub async fn session_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let session = match extract_bearer(req.headers()) {
        Some(token) => match state.tokens.validate(token, Utc::now()) {
            Ok(claims) => SessionContext::authenticated(state.services.users.resolve(&claims)),
            Err(e) => {
                tracing::debug!("rejected session token: {e}");
                SessionContext::anonymous()
            }
        },
        None => SessionContext::anonymous(),
    };

    req.extensions_mut().insert(session);
    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
