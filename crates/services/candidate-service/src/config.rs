//! Candidate service configuration.

use std::env;

use common::config::port_from_env;
use common::{ConfigError, GtConfig};

pub const DEFAULT_HTTP_PORT: u16 = 8002;

#[derive(Debug, Clone)]
pub struct CandidateServiceConfig {
    pub base: GtConfig,
    pub host: String,
    pub port: u16,
}

impl CandidateServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base: GtConfig::from_env()?,
            host: env::var("CANDIDATE_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: port_from_env("CANDIDATE_SERVICE_PORT", DEFAULT_HTTP_PORT)?,
        })
    }
}
