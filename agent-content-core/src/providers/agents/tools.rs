//! Converters for completed tool-specific run steps

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::types::RunStepToolCall;
use super::{
    AgentContentGenerator, AZURE_AI_SEARCH_NAME, BING_CUSTOM_SEARCH_NAME, BING_GROUNDING_NAME,
    CODE_KEY,
};
use crate::protocol::{AuthorRole, ChatMessage, ContentItem, FunctionArguments};
use crate::providers::error::{ConversionError, ConversionResult};

impl AgentContentGenerator {
    /// Wrap code produced by the code interpreter for rendering
    pub fn generate_code_interpreter_content(&self, agent_name: &str, code: &str) -> ChatMessage {
        let mut out = ChatMessage::new(AuthorRole::Assistant)
            .with_item(ContentItem::text(code))
            .with_metadata(CODE_KEY, Value::Bool(true));
        out.name = self.author_name(agent_name);
        out
    }

    /// Surface a Bing grounding or Bing custom search call as a function call
    ///
    /// The call's parameter map becomes the arguments unchanged; values that
    /// are themselves serialized structures stay strings.
    pub fn generate_bing_grounding_content(
        &self,
        agent_name: &str,
        tool_call: &RunStepToolCall,
    ) -> ConversionResult<ChatMessage> {
        let (id, name, parameters) = match tool_call {
            RunStepToolCall::BingGrounding(call) => {
                (&call.id, BING_GROUNDING_NAME, &call.bing_grounding)
            }
            RunStepToolCall::BingCustomSearch(call) => {
                (&call.id, BING_CUSTOM_SEARCH_NAME, &call.bing_custom_search)
            }
            other => {
                return Err(ConversionError::UnsupportedToolCall {
                    expected: format!("{} or {}", BING_GROUNDING_NAME, BING_CUSTOM_SEARCH_NAME),
                    actual: other.kind().to_string(),
                })
            }
        };
        Ok(self.search_call_message(agent_name, id, name, parameters))
    }

    /// Surface an Azure AI Search call as a function call
    pub fn generate_azure_ai_search_content(
        &self,
        agent_name: &str,
        tool_call: &RunStepToolCall,
    ) -> ConversionResult<ChatMessage> {
        let RunStepToolCall::AzureAiSearch(call) = tool_call else {
            return Err(ConversionError::UnsupportedToolCall {
                expected: AZURE_AI_SEARCH_NAME.to_string(),
                actual: tool_call.kind().to_string(),
            });
        };
        Ok(self.search_call_message(
            agent_name,
            &call.id,
            AZURE_AI_SEARCH_NAME,
            &call.azure_ai_search,
        ))
    }

    fn search_call_message(
        &self,
        agent_name: &str,
        id: &str,
        name: &str,
        parameters: &serde_json::Map<String, Value>,
    ) -> ChatMessage {
        debug!(tool_call_id = id, tool = name, "converted search tool call");
        let call = self.function_call(id, name, Some(FunctionArguments::Mapping(parameters.clone())));
        ChatMessage {
            role: AuthorRole::Assistant,
            name: self.author_name(agent_name),
            items: vec![ContentItem::FunctionCall(call)],
            metadata: HashMap::new(),
        }
    }
}
