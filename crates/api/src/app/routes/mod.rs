use axum::{routing::get, Router};

pub mod content;
pub mod rbac;
pub mod system;
pub mod users;

/// Router for all session-aware endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/capabilities", get(system::capabilities))
        .route("/dashboard", get(system::dashboard))
        .nest("/content", content::router())
        .nest("/users", users::router())
        .nest("/rbac", rbac::router())
}
