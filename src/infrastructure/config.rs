//! Application configuration

use std::env;

use anyhow::{Context, Result};

use crate::domain::services::ScenarioGenerator;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Generator retries before giving up on a seed
    pub max_generation_attempts: u32,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            max_generation_attempts: lookup("SCENARIO_MAX_GENERATION_ATTEMPTS")
                .unwrap_or_else(|| ScenarioGenerator::DEFAULT_MAX_ATTEMPTS.to_string())
                .parse()
                .context("SCENARIO_MAX_GENERATION_ATTEMPTS must be a positive integer")?,
        })
    }
}
