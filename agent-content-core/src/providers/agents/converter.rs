//! Conversion between agent service payloads and normalized messages

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::debug;

use super::annotations::generate_annotation_content;
use super::types::{
    MessageContent, RequiredAction, RequiredToolCall, RunStep, RunStepFunctionToolCall,
    ThreadMessage, ThreadRun,
};
use super::{AgentContentGenerator, STEP_ID_KEY};
use crate::protocol::{
    AuthorRole, ChatMessage, ContentItem, FunctionCallContent, FunctionResultContent,
    ImageContent, MessageImageFileParam, MessageImageUrlParam, MessageInputContent,
};
use crate::providers::error::ConversionResult;

impl AgentContentGenerator {
    /// Convert a completed thread message into a normalized message
    ///
    /// Content units are emitted in source order: an image file becomes a
    /// file reference, a text unit becomes a text item followed by its
    /// annotations. The role is taken from `role`, not from the thread message.
    pub fn generate_message_content(
        &self,
        role: AuthorRole,
        message: &ThreadMessage,
        step: Option<&RunStep>,
    ) -> ConversionResult<ChatMessage> {
        let mut out = ChatMessage::new(role);

        for content in &message.content {
            match content {
                MessageContent::ImageFile { image_file } => {
                    out.items
                        .push(ContentItem::file_reference(image_file.file_id.clone()));
                }
                MessageContent::Text { text } => {
                    out.items.push(ContentItem::text(text.value.clone()));
                    for annotation in &text.annotations {
                        out.items
                            .push(ContentItem::Annotation(generate_annotation_content(annotation)?));
                    }
                }
                MessageContent::Unknown => {
                    debug!(message_id = ?message.id, "skipping unsupported message content");
                }
            }
        }

        self.attach_message_metadata(&mut out, message, step);

        debug!(
            message_id = ?message.id,
            step_id = step.map(|s| s.id.as_str()),
            items = out.items.len(),
            "converted thread message"
        );
        Ok(out)
    }

    fn attach_message_metadata(
        &self,
        out: &mut ChatMessage,
        message: &ThreadMessage,
        step: Option<&RunStep>,
    ) {
        let metadata = &mut out.metadata;
        let settings = &self.config.metadata;

        if settings.include_message_context {
            // Message identifiers win; the step fills in what the message lacks.
            let context = [
                ("message_id", message.id.clone()),
                (
                    "thread_id",
                    message
                        .thread_id
                        .clone()
                        .or_else(|| step.and_then(|s| s.thread_id.clone())),
                ),
                (
                    "run_id",
                    message
                        .run_id
                        .clone()
                        .or_else(|| step.and_then(|s| s.run_id.clone())),
                ),
                (
                    "agent_id",
                    message
                        .agent_id
                        .clone()
                        .or_else(|| step.and_then(|s| s.agent_id.clone())),
                ),
            ];
            for (key, value) in context {
                if let Some(value) = value {
                    metadata.insert(key.to_string(), Value::String(value));
                }
            }
            if let Some(created_at) = message.created_at {
                metadata.insert("created_at".to_string(), json!(created_at));
            }
        }

        if let Some(step) = step {
            metadata.insert(STEP_ID_KEY.to_string(), Value::String(step.id.clone()));
            if settings.include_usage {
                if let Some(usage) = &step.usage {
                    metadata.insert(
                        "usage".to_string(),
                        json!({
                            "prompt_tokens": usage.prompt_tokens,
                            "completion_tokens": usage.completion_tokens,
                            "total_tokens": usage.total_tokens,
                        }),
                    );
                }
            }
        }
    }

    /// Extract the function calls a run is waiting on
    ///
    /// `function_steps` is the caller's record of calls seen so far. It is
    /// only consulted for diagnostics; every required call is returned.
    pub fn get_function_call_contents(
        &self,
        run: &ThreadRun,
        function_steps: &HashMap<String, FunctionCallContent>,
    ) -> Vec<FunctionCallContent> {
        let Some(action) = &run.required_action else {
            return Vec::new();
        };

        let RequiredAction::SubmitToolOutputs {
            submit_tool_outputs,
        } = action
        else {
            debug!(run_id = %run.id, "required action is not a tool output submission");
            return Vec::new();
        };

        let calls: Vec<FunctionCallContent> = submit_tool_outputs
            .tool_calls
            .iter()
            .filter_map(|tool_call| match tool_call {
                RequiredToolCall::Function(call) => Some(self.function_call(
                    call.id.clone(),
                    call.function.name.clone(),
                    call.function.arguments.clone(),
                )),
                RequiredToolCall::Unknown => {
                    debug!(run_id = %run.id, "skipping non-function required tool call");
                    None
                }
            })
            .collect();

        let already_seen = calls
            .iter()
            .filter(|call| function_steps.contains_key(&call.id))
            .count();
        debug!(
            run_id = %run.id,
            calls = calls.len(),
            already_seen,
            "extracted required function calls"
        );
        calls
    }

    /// Wrap function calls into an assistant message
    pub fn generate_function_call_content(
        &self,
        agent_name: &str,
        calls: Vec<FunctionCallContent>,
    ) -> ChatMessage {
        ChatMessage {
            role: AuthorRole::Assistant,
            name: self.author_name(agent_name),
            items: calls.into_iter().map(ContentItem::FunctionCall).collect(),
            metadata: HashMap::new(),
        }
    }

    /// Build the tool message carrying the output of `call`
    ///
    /// The output is passed through verbatim; a missing output becomes `null`.
    pub fn generate_function_result_content(
        &self,
        agent_name: &str,
        call: &FunctionCallContent,
        tool_call: &RunStepFunctionToolCall,
    ) -> ChatMessage {
        let result = tool_call.function.output.clone().unwrap_or(Value::Null);
        ChatMessage {
            role: AuthorRole::Tool,
            name: self.author_name(agent_name),
            items: vec![ContentItem::FunctionResult(FunctionResultContent::for_call(
                call, result,
            ))],
            metadata: HashMap::new(),
        }
    }
}

/// Flatten a normalized message into service input content blocks
///
/// Text, images with a URI, file references and function results are
/// mapped; every other item is skipped.
pub fn get_message_contents(message: &ChatMessage) -> Vec<MessageInputContent> {
    message
        .items
        .iter()
        .filter_map(|item| match item {
            ContentItem::Text(text) => Some(MessageInputContent::Text {
                text: text.text.clone(),
            }),
            ContentItem::Image(ImageContent { uri: Some(uri), .. }) => {
                Some(MessageInputContent::ImageUrl {
                    image_url: MessageImageUrlParam {
                        url: uri.to_string(),
                    },
                })
            }
            ContentItem::FileReference(file) => Some(MessageInputContent::ImageFile {
                image_file: MessageImageFileParam {
                    file_id: file.file_id.clone(),
                },
            }),
            ContentItem::FunctionResult(result) => Some(MessageInputContent::Text {
                text: result.result_text(),
            }),
            other => {
                debug!(kind = other.kind(), "skipping item with no input representation");
                None
            }
        })
        .collect()
}
