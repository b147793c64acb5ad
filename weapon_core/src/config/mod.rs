//! Configuration and definition document parsing
//!
//! Everything here works on strings already read by the host; no file
//! access happens in this crate.

mod definitions;
mod registry;

pub use definitions::{
    definition_id_from_path, load_definitions, parse_definition_json, parse_definition_toml,
    DefinitionSet, DEFINITIONS_DIR,
};
pub use registry::RegistryConfig;

use crate::types::IdError;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid identifier: {0}")]
    IdError(#[from] IdError),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON string and deserialize it
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = serde_json::from_str(content)?;
    Ok(config)
}
