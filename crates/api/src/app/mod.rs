//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: in-memory content store and user directory
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and parsing helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Upper bound on request bodies (JSON record fields).
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Router {
    build_app_with_services(config, Arc::new(services::AppServices::new()))
}

pub fn build_app_with_services(config: &ApiConfig, services: Arc<services::AppServices>) -> Router {
    let tokens = Arc::new(harborcms_auth::Hs256TokenValidator::new(config.jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState {
        tokens,
        services: services.clone(),
    };

    // Session-aware routes: every handler enforces through the guard.
    let admin = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(admin)
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(MAX_BODY_BYTES)))
}
