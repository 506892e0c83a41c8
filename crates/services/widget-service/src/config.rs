//! Widget service configuration.

use std::env;

use common::config::port_from_env;
use common::{ConfigError, GtConfig};

pub const DEFAULT_HTTP_PORT: u16 = 8005;

#[derive(Debug, Clone)]
pub struct WidgetServiceConfig {
    pub base: GtConfig,
    pub host: String,
    pub port: u16,
    /// `POST /contact_only`: requests per window per client IP
    pub contact_rate_limit_requests: u64,
    pub contact_rate_limit_window_seconds: u64,
}

impl WidgetServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base: GtConfig::from_env()?,
            host: env::var("WIDGET_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: port_from_env("WIDGET_SERVICE_PORT", DEFAULT_HTTP_PORT)?,
            contact_rate_limit_requests: env::var("RATE_LIMIT_WIDGET_REQUESTS")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(10),
            contact_rate_limit_window_seconds: env::var("RATE_LIMIT_WIDGET_WINDOW_SECONDS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(60),
        })
    }
}
