//! Configuration schema structures with serde support

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationErrorKind};
use crate::protocol::DEFAULT_FUNCTION_NAME_SEPARATOR;

/// Schema versions this crate understands
pub const SUPPORTED_VERSIONS: &[&str] = &["0.1"];

/// Root configuration for content conversion
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Schema version (required - no default)
    pub version: String,

    #[serde(default)]
    pub agent: AgentSettings,

    #[serde(default)]
    pub metadata: MetadataSettings,

    #[serde(default)]
    pub streaming: StreamingSettings,

    #[serde(default)]
    pub functions: FunctionSettings,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSIONS[0].to_string(),
            agent: AgentSettings::default(),
            metadata: MetadataSettings::default(),
            streaming: StreamingSettings::default(),
            functions: FunctionSettings::default(),
        }
    }
}

/// Settings about the agent authoring messages
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSettings {
    /// Author name used when a caller supplies an empty agent name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_name: Option<String>,
}

/// Which traceability data is attached to converted messages
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataSettings {
    /// Copy message/thread/run/agent identifiers and timestamps into metadata
    #[serde(default = "default_true")]
    pub include_message_context: bool,

    /// Copy run-step token usage into metadata
    #[serde(default = "default_true")]
    pub include_usage: bool,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            include_message_context: true,
            include_usage: true,
        }
    }
}

/// Settings for streamed fragments
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StreamingSettings {
    /// Choice index stamped on every streamed fragment
    #[serde(default)]
    pub choice_index: usize,
}

/// Settings for function-call naming
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionSettings {
    /// Separator between plugin and function in qualified names
    #[serde(default = "default_separator")]
    pub name_separator: String,
}

impl Default for FunctionSettings {
    fn default() -> Self {
        Self {
            name_separator: default_separator(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_separator() -> String {
    DEFAULT_FUNCTION_NAME_SEPARATOR.to_string()
}

impl ContentConfig {
    /// Structural validation of the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError::required("version"));
        }
        if !SUPPORTED_VERSIONS.contains(&self.version.as_str()) {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::InvalidVersion {
                    expected: SUPPORTED_VERSIONS.join(", "),
                    actual: self.version.clone(),
                },
            ));
        }
        if self.functions.name_separator.is_empty() {
            return Err(ValidationError::required("functions.name_separator"));
        }
        Ok(())
    }
}
