//! Auth service configuration.

use std::env;

use common::config::port_from_env;
use common::{ConfigError, GtConfig};

pub const DEFAULT_HTTP_PORT: u16 = 8001;
pub const DEFAULT_GRPC_PORT: u16 = 50051;

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub base: GtConfig,
    pub host: String,
    /// OAuth2 / user REST API
    pub port: u16,
    /// VerifyToken / RevokeToken
    pub grpc_port: u16,
    /// Token endpoint: requests per window per client IP
    pub token_rate_limit_requests: u64,
    pub token_rate_limit_window_seconds: u64,
}

impl AuthServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base: GtConfig::from_env()?,
            host: env::var("AUTH_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: port_from_env("AUTH_SERVICE_PORT", DEFAULT_HTTP_PORT)?,
            grpc_port: port_from_env("AUTH_SERVICE_GRPC_PORT", DEFAULT_GRPC_PORT)?,
            token_rate_limit_requests: env::var("RATE_LIMIT_AUTH_REQUESTS")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(10),
            token_rate_limit_window_seconds: env::var("RATE_LIMIT_AUTH_WINDOW_SECONDS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(60),
        })
    }
}
