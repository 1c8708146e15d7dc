//! HTTP API: admin-panel endpoints, session resolution and error mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
