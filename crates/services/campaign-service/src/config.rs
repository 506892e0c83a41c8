//! Campaign service configuration.

use std::env;

use common::config::port_from_env;
use common::{ConfigError, GtConfig};

pub const DEFAULT_HTTP_PORT: u16 = 8004;

#[derive(Debug, Clone)]
pub struct CampaignServiceConfig {
    pub base: GtConfig,
    pub host: String,
    pub port: u16,
}

impl CampaignServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base: GtConfig::from_env()?,
            host: env::var("CAMPAIGN_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: port_from_env("CAMPAIGN_SERVICE_PORT", DEFAULT_HTTP_PORT)?,
        })
    }
}
