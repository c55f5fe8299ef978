//! Streaming delta conversion
//!
//! Each function turns one delta event into one fragment. Fragments are
//! not cumulative: the caller concatenates them across events.

use serde_json::Value;
use tracing::{debug, trace};

use super::annotations::generate_streaming_annotation_content;
use super::types::{
    MessageDeltaChunk, MessageDeltaContent, RunStepDeltaCodeInterpreterOutput,
    RunStepDeltaToolCall, RunStepDeltaToolCallObject,
};
use super::{
    AgentContentGenerator, AZURE_AI_SEARCH_NAME, BING_CUSTOM_SEARCH_NAME, BING_GROUNDING_NAME,
    CODE_KEY,
};
use crate::protocol::{
    AuthorRole, FunctionArguments, StreamingChatMessage, StreamingContentItem,
    StreamingFileReferenceContent, StreamingTextContent,
};
use crate::providers::error::ConversionResult;

impl AgentContentGenerator {
    /// Convert one message delta into a streamed fragment
    ///
    /// Units are ordered by their position index; units sharing an index keep
    /// the order the chunk lists them in. A chunk without usable units yields
    /// a fragment with no items.
    pub fn generate_streaming_message_content(
        &self,
        role: AuthorRole,
        chunk: &MessageDeltaChunk,
    ) -> ConversionResult<StreamingChatMessage> {
        let choice_index = self.config.streaming.choice_index;
        let mut out = StreamingChatMessage::new(role, choice_index)
            .with_metadata("message_id", Value::String(chunk.id.clone()));

        let mut units: Vec<&MessageDeltaContent> = chunk.delta.content.iter().collect();
        units.sort_by_key(|unit| unit.index());

        for unit in units {
            match unit {
                MessageDeltaContent::ImageFile(image) => {
                    out.items.push(StreamingContentItem::FileReference(
                        StreamingFileReferenceContent {
                            file_id: image.image_file.as_ref().and_then(|f| f.file_id.clone()),
                        },
                    ));
                }
                MessageDeltaContent::Text(text) => {
                    let Some(text) = &text.text else {
                        continue;
                    };
                    if let Some(value) = &text.value {
                        out.items.push(StreamingContentItem::Text(StreamingTextContent {
                            text: value.clone(),
                            choice_index,
                        }));
                    }
                    for annotation in &text.annotations {
                        out.items.push(StreamingContentItem::Annotation(
                            generate_streaming_annotation_content(annotation)?,
                        ));
                    }
                }
                MessageDeltaContent::Unknown => {
                    debug!(chunk_id = %chunk.id, "skipping unsupported delta content");
                }
            }
        }

        trace!(chunk_id = %chunk.id, items = out.items.len(), "converted message delta");
        Ok(out)
    }

    /// Convert streamed function tool calls into a fragment of function calls
    ///
    /// Arguments arrive as string fragments and are passed on as such;
    /// structured arguments are JSON-encoded. Returns `None` when the delta
    /// has no tool calls.
    pub fn generate_streaming_function_content(
        &self,
        agent_name: &str,
        details: &RunStepDeltaToolCallObject,
    ) -> ConversionResult<Option<StreamingChatMessage>> {
        let Some(tool_calls) = non_empty_tool_calls(details) else {
            return Ok(None);
        };

        let mut out = self.streaming_fragment(agent_name);
        for tool_call in tool_calls {
            let RunStepDeltaToolCall::Function(call) = tool_call else {
                continue;
            };
            let Some(function) = &call.function else {
                continue;
            };
            let arguments = function
                .arguments
                .as_ref()
                .map(|args| args.to_raw_string().map(FunctionArguments::Raw))
                .transpose()?;
            let name = function.name.clone().unwrap_or_default();
            out.items.push(StreamingContentItem::FunctionCall(
                self.function_call(call.id.clone(), name, arguments)
                    .with_index(call.index),
            ));
        }

        Ok(Some(out))
    }

    /// Convert streamed code-interpreter calls into a code fragment
    ///
    /// Returns `None` when the delta has no tool calls at all. Calls of other
    /// kinds are ignored.
    pub fn generate_streaming_code_interpreter_content(
        &self,
        agent_name: &str,
        details: &RunStepDeltaToolCallObject,
    ) -> Option<StreamingChatMessage> {
        let tool_calls = non_empty_tool_calls(details)?;
        let choice_index = self.config.streaming.choice_index;

        let mut out = self
            .streaming_fragment(agent_name)
            .with_metadata(CODE_KEY, Value::Bool(true));

        for tool_call in tool_calls {
            let RunStepDeltaToolCall::CodeInterpreter(call) = tool_call else {
                continue;
            };
            let Some(code_interpreter) = &call.code_interpreter else {
                continue;
            };
            if let Some(input) = &code_interpreter.input {
                out.items.push(StreamingContentItem::Text(StreamingTextContent {
                    text: input.clone(),
                    choice_index,
                }));
            }
            for output in code_interpreter.outputs.iter().flatten() {
                match output {
                    RunStepDeltaCodeInterpreterOutput::Image(image) => {
                        if let Some(file_id) = image.image.as_ref().and_then(|i| i.file_id.clone())
                        {
                            out.items.push(StreamingContentItem::FileReference(
                                StreamingFileReferenceContent {
                                    file_id: Some(file_id),
                                },
                            ));
                        }
                    }
                    RunStepDeltaCodeInterpreterOutput::Logs(logs) => {
                        if let Some(text) = &logs.logs {
                            out.items.push(StreamingContentItem::Text(StreamingTextContent {
                                text: text.clone(),
                                choice_index,
                            }));
                        }
                    }
                    RunStepDeltaCodeInterpreterOutput::Unknown => {}
                }
            }
        }

        Some(out)
    }

    /// Convert streamed Bing grounding and Bing custom search calls
    ///
    /// Returns `None` when the delta holds no such calls.
    pub fn generate_streaming_bing_grounding_content(
        &self,
        agent_name: &str,
        details: &RunStepDeltaToolCallObject,
    ) -> Option<StreamingChatMessage> {
        self.streaming_search_content(agent_name, details, |tool_call| match tool_call {
            RunStepDeltaToolCall::BingGrounding(call) => Some((
                call.index,
                &call.id,
                BING_GROUNDING_NAME,
                &call.bing_grounding,
            )),
            RunStepDeltaToolCall::BingCustomSearch(call) => Some((
                call.index,
                &call.id,
                BING_CUSTOM_SEARCH_NAME,
                &call.bing_custom_search,
            )),
            _ => None,
        })
    }

    /// Convert streamed Azure AI Search calls
    pub fn generate_streaming_azure_ai_search_content(
        &self,
        agent_name: &str,
        details: &RunStepDeltaToolCallObject,
    ) -> Option<StreamingChatMessage> {
        self.streaming_search_content(agent_name, details, |tool_call| match tool_call {
            RunStepDeltaToolCall::AzureAiSearch(call) => Some((
                call.index,
                &call.id,
                AZURE_AI_SEARCH_NAME,
                &call.azure_ai_search,
            )),
            _ => None,
        })
    }

    fn streaming_search_content<'a, F>(
        &self,
        agent_name: &str,
        details: &'a RunStepDeltaToolCallObject,
        select: F,
    ) -> Option<StreamingChatMessage>
    where
        F: Fn(
            &'a RunStepDeltaToolCall,
        ) -> Option<(usize, &'a String, &'static str, &'a serde_json::Map<String, Value>)>,
    {
        let tool_calls = non_empty_tool_calls(details)?;

        let mut out = self.streaming_fragment(agent_name);
        for (index, id, name, parameters) in tool_calls.iter().filter_map(select) {
            out.items.push(StreamingContentItem::FunctionCall(
                self.function_call(
                    id.clone(),
                    name,
                    Some(FunctionArguments::Mapping(parameters.clone())),
                )
                .with_index(index),
            ));
        }

        if out.items.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// Empty assistant fragment authored by `agent_name`
    fn streaming_fragment(&self, agent_name: &str) -> StreamingChatMessage {
        let mut out =
            StreamingChatMessage::new(AuthorRole::Assistant, self.config.streaming.choice_index);
        out.name = self.author_name(agent_name);
        out
    }
}

fn non_empty_tool_calls(details: &RunStepDeltaToolCallObject) -> Option<&[RunStepDeltaToolCall]> {
    details
        .tool_calls
        .as_deref()
        .filter(|calls| !calls.is_empty())
}
