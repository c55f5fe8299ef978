//! Configuration module
//!
//! This module provides the configuration schema, loading and validation for
//! the content converters.

mod env;
mod error;
mod schema;
mod validator;

pub use env::interpolate_env_vars;
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{
    AgentSettings, ContentConfig, FunctionSettings, MetadataSettings, StreamingSettings,
    SUPPORTED_VERSIONS,
};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<ContentConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: ContentConfig =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    tracing::debug!(path = %path.display(), "loaded content config");
    Ok(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<ContentConfig> {
    let path = path.as_ref();
    let content = read_config(path)?;

    let config: ContentConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    tracing::debug!(path = %path.display(), "loaded content config");
    Ok(config)
}

/// Read a config file and interpolate environment variables
fn read_config(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    interpolate_env_vars(&content)
}
