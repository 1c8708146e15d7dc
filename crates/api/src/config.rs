//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid HARBORCMS_BIND '{value}': {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Shared secret for HS256 session tokens.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// `HARBORCMS_BIND` (default `0.0.0.0:8080`) and `JWT_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("HARBORCMS_BIND").ok(),
            std::env::var("JWT_SECRET").ok(),
        )
    }

    fn from_vars(bind: Option<String>, jwt_secret: Option<String>) -> Result<Self, ConfigError> {
        let bind = bind.unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBind { value: bind.clone(), source })?;

        let jwt_secret = match jwt_secret {
            Some(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self { bind_addr, jwt_secret })
    }

    /// Config for tests and embedding: given secret, ephemeral loopback port.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.into(),
        }
    }
}
