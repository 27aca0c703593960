//! Configuration handling for hermes formatters.
//!
//! Configuration is read from a YAML file and then overridden by environment
//! variables.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Formatter pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HermesConfig {
    /// Capacity of the decoded-message channel
    pub inbound_capacity: usize,
    /// Capacity of the encoded-packet channel
    pub outbound_capacity: usize,
    /// Default log filter directive
    pub log_level: String,
}

impl Default for HermesConfig {
    fn default() -> Self {
        Self {
            inbound_capacity: 1024,
            outbound_capacity: 1024,
            log_level: "info".to_string(),
        }
    }
}

/// Root configuration structure (matches the YAML structure)
#[derive(Debug, Deserialize)]
struct RootConfig {
    hermes: Option<HermesConfig>,
}

impl HermesConfig {
    /// Load configuration from file and environment variables
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config = Self::default();

        if let Ok(content) = std::fs::read_to_string(&config_path) {
            match serde_yaml::from_str::<RootConfig>(&content) {
                Ok(RootConfig {
                    hermes: Some(hermes),
                }) => {
                    config = hermes;
                    info!("Loaded configuration from {:?}", config_path.as_ref());
                }
                Ok(RootConfig { hermes: None }) => {
                    warn!(
                        "No hermes section in {:?}, using defaults",
                        config_path.as_ref()
                    );
                }
                Err(err) => {
                    warn!(
                        "Failed to parse config file {:?}, using defaults: {}",
                        config_path.as_ref(),
                        err
                    );
                }
            }
        } else {
            warn!(
                "Config file {:?} not found, using defaults",
                config_path.as_ref()
            );
        }

        config.apply_environment_overrides();
        config.validate()?;

        info!(
            "Final hermes configuration: inbound_capacity={}, outbound_capacity={}, log_level={}",
            config.inbound_capacity, config.outbound_capacity, config.log_level
        );

        Ok(config)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.inbound_capacity == 0 {
            bail!("inbound_capacity must be greater than zero");
        }
        if self.outbound_capacity == 0 {
            bail!("outbound_capacity must be greater than zero");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_environment_overrides(&mut self) {
        if let Ok(value) = std::env::var("HERMES_INBOUND_CAPACITY") {
            if let Ok(capacity) = value.parse::<usize>() {
                self.inbound_capacity = capacity;
                info!("Inbound capacity overridden by environment: {}", capacity);
            }
        }

        if let Ok(value) = std::env::var("HERMES_OUTBOUND_CAPACITY") {
            if let Ok(capacity) = value.parse::<usize>() {
                self.outbound_capacity = capacity;
                info!("Outbound capacity overridden by environment: {}", capacity);
            }
        }

        if let Ok(level) = std::env::var("HERMES_LOG_LEVEL") {
            info!("Log level overridden by environment: {}", level);
            self.log_level = level;
        }
    }
}
