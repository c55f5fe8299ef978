//! Agent service content conversion
//!
//! This module translates the agent service's thread messages, run steps,
//! runs and streaming deltas into the normalized content model of
//! [`crate::protocol`], and normalized messages back into service input blocks.

mod annotations;
mod converter;
mod streaming;
mod tools;
pub mod types;

pub use annotations::{generate_annotation_content, generate_streaming_annotation_content};
pub use converter::get_message_contents;

use crate::config::ContentConfig;
use crate::protocol::{FunctionArguments, FunctionCallContent};

/// Metadata key holding the id of the run step that produced a message
pub const STEP_ID_KEY: &str = "step_id";

/// Metadata key marking code-interpreter content
pub const CODE_KEY: &str = "code";

/// Function names under which grounding tool calls are surfaced
pub const BING_GROUNDING_NAME: &str = "bing_grounding";
pub const BING_CUSTOM_SEARCH_NAME: &str = "bing_custom_search";
pub const AZURE_AI_SEARCH_NAME: &str = "azure_ai_search";

/// Converts agent service payloads into normalized messages
///
/// The generator only holds configuration; every conversion is a pure
/// function of its inputs, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct AgentContentGenerator {
    config: ContentConfig,
}

impl AgentContentGenerator {
    /// Create a generator with the given configuration
    pub fn new(config: ContentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Author name for a message, falling back to the configured default
    fn author_name(&self, agent_name: &str) -> Option<String> {
        if agent_name.is_empty() {
            self.config.agent.default_name.clone()
        } else {
            Some(agent_name.to_string())
        }
    }

    /// Build a function call using the configured name separator
    fn function_call(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Option<FunctionArguments>,
    ) -> FunctionCallContent {
        FunctionCallContent::with_separator(
            id,
            name,
            arguments,
            &self.config.functions.name_separator,
        )
    }
}
