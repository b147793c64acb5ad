//! Registry tunables

use super::ConfigError;
use crate::resolve::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Tunables for a [`WeaponRegistry`](crate::registry::WeaponRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum parent hops followed when resolving one definition
    #[serde(default = "default_max_inheritance_depth")]
    pub max_inheritance_depth: usize,
    /// Largest payload body accepted on encode and decode
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
    /// Log the full payload body at debug level after encoding
    #[serde(default)]
    pub log_payload: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            max_inheritance_depth: DEFAULT_MAX_DEPTH,
            max_payload_bytes: default_max_payload_bytes(),
            log_payload: false,
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a TOML config string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_payload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_payload_bytes > u32::MAX as usize {
            return Err(ConfigError::ValidationError(format!(
                "max_payload_bytes must not exceed {}",
                u32::MAX
            )));
        }
        Ok(())
    }
}

fn default_max_inheritance_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_payload_bytes() -> usize {
    1024 * 1024
}
