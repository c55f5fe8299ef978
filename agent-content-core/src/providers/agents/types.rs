//! Agent service wire types
//!
//! These types match the agent service's thread, run and run-step payloads
//! and are only ever deserialized: the transport layer hands them to the
//! converters already decoded. Optional fields stay `Option` so that absent
//! and empty values remain distinguishable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::protocol::FunctionArguments;

// ============================================================================
// Thread messages
// ============================================================================

/// A message stored on a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,

    /// Unix timestamp (seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,

    /// Role as reported by the service ("user" or "assistant")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Vec<MessageContent>,
}

/// One content unit of a thread message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: MessageTextDetails },
    ImageFile { image_file: MessageImageFileDetails },
    #[serde(other)]
    Unknown,
}

/// Text body of a message content unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTextDetails {
    pub value: String,

    #[serde(default)]
    pub annotations: Vec<MessageTextAnnotation>,
}

/// Image file of a message content unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageImageFileDetails {
    pub file_id: String,
}

/// Annotation attached to message text
///
/// The service uses three sibling shapes (file citation, file path, URL
/// citation); exactly one of the detail objects is expected to be populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageTextAnnotation {
    /// Discriminant reported by the service, informational only
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<String>,

    /// Display text the annotation replaces
    pub text: Option<String>,

    pub start_index: Option<i64>,

    pub end_index: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_citation: Option<MessageTextFileCitationDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<MessageTextFilePathDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_citation: Option<MessageTextUrlCitationDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTextFileCitationDetails {
    pub file_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTextFilePathDetails {
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTextUrlCitationDetails {
    pub url: String,

    pub title: Option<String>,
}

// ============================================================================
// Runs and run steps
// ============================================================================

/// A run of an agent on a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRun {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Action the client must take before the run can continue
    pub required_action: Option<RequiredAction>,
}

/// Pending action on a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredAction {
    SubmitToolOutputs {
        submit_tool_outputs: SubmitToolOutputsDetails,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitToolOutputsDetails {
    #[serde(default)]
    pub tool_calls: Vec<RequiredToolCall>,
}

/// A tool call whose output the client must submit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredToolCall {
    Function(RequiredFunctionToolCall),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredFunctionToolCall {
    pub id: String,
    pub function: RequiredFunctionToolCallDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredFunctionToolCallDetails {
    pub name: String,

    /// Mapping or pre-serialized string, as sent by the service
    pub arguments: Option<FunctionArguments>,
}

/// One action taken during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStep {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_details: Option<RunStepDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<RunStepCompletionUsage>,
}

/// Token usage of a run step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStepCompletionUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// What a run step did
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunStepDetails {
    MessageCreation {
        message_creation: RunStepMessageCreationReference,
    },
    ToolCalls {
        #[serde(default)]
        tool_calls: Vec<RunStepToolCall>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepMessageCreationReference {
    pub message_id: String,
}

/// A tool call recorded on a completed run step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunStepToolCall {
    Function(RunStepFunctionToolCall),
    CodeInterpreter(RunStepCodeInterpreterToolCall),
    BingGrounding(RunStepBingGroundingToolCall),
    BingCustomSearch(RunStepBingCustomSearchToolCall),
    AzureAiSearch(RunStepAzureAiSearchToolCall),
    #[serde(other)]
    Unknown,
}

impl RunStepToolCall {
    /// Wire name of the tool-call kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::CodeInterpreter(_) => "code_interpreter",
            Self::BingGrounding(_) => "bing_grounding",
            Self::BingCustomSearch(_) => "bing_custom_search",
            Self::AzureAiSearch(_) => "azure_ai_search",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepFunctionToolCall {
    pub id: String,
    pub function: RunStepFunctionToolCallDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepFunctionToolCallDetails {
    pub name: String,

    pub arguments: Option<FunctionArguments>,

    /// Tool output, usually a string; `None` until outputs are submitted
    pub output: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepCodeInterpreterToolCall {
    pub id: String,
    pub code_interpreter: RunStepCodeInterpreterToolCallDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepCodeInterpreterToolCallDetails {
    pub input: String,

    #[serde(default)]
    pub outputs: Vec<RunStepCodeInterpreterOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunStepCodeInterpreterOutput {
    Logs { logs: String },
    Image { image: RunStepCodeInterpreterImageReference },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepCodeInterpreterImageReference {
    pub file_id: String,
}

/// Bing grounding search; the parameter map is surfaced without parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepBingGroundingToolCall {
    pub id: String,

    #[serde(default)]
    pub bing_grounding: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepBingCustomSearchToolCall {
    pub id: String,

    #[serde(default)]
    pub bing_custom_search: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepAzureAiSearchToolCall {
    pub id: String,

    #[serde(default)]
    pub azure_ai_search: Map<String, Value>,
}

// ============================================================================
// Streaming deltas
// ============================================================================

/// A streamed fragment of an in-progress message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaChunk {
    pub id: String,

    pub delta: MessageDelta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Vec<MessageDeltaContent>,
}

/// One content unit of a message delta
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageDeltaContent {
    ImageFile(MessageDeltaImageFileContent),
    Text(MessageDeltaTextContent),
    #[serde(other)]
    Unknown,
}

impl MessageDeltaContent {
    /// Position of this unit within the assembled message
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::ImageFile(image) => Some(image.index),
            Self::Text(text) => Some(text.index),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaImageFileContent {
    pub index: usize,

    pub image_file: Option<MessageDeltaImageFileContentObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaImageFileContentObject {
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaTextContent {
    pub index: usize,

    pub text: Option<MessageDeltaTextContentObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaTextContentObject {
    pub value: Option<String>,

    #[serde(default)]
    pub annotations: Vec<MessageDeltaTextAnnotation>,
}

/// Annotation attached to a text delta
///
/// The URL-citation shape of this payload carries no display text; any
/// `text` sent alongside a URL citation is ignored by the classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageDeltaTextAnnotation {
    #[serde(default)]
    pub index: usize,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<String>,

    pub text: Option<String>,

    pub start_index: Option<i64>,

    pub end_index: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_citation: Option<MessageDeltaTextFileCitationObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<MessageDeltaTextFilePathObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_citation: Option<MessageDeltaTextUrlCitationDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaTextFileCitationObject {
    pub file_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaTextFilePathObject {
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaTextUrlCitationDetails {
    pub url: String,

    pub title: Option<String>,
}

/// Streamed tool-call details of a run step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStepDeltaToolCallObject {
    pub tool_calls: Option<Vec<RunStepDeltaToolCall>>,
}

/// A streamed fragment of a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunStepDeltaToolCall {
    Function(RunStepDeltaFunctionToolCall),
    CodeInterpreter(RunStepDeltaCodeInterpreterToolCall),
    BingGrounding(RunStepDeltaBingGroundingToolCall),
    BingCustomSearch(RunStepDeltaBingCustomSearchToolCall),
    AzureAiSearch(RunStepDeltaAzureAiSearchToolCall),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaFunctionToolCall {
    pub index: usize,

    pub id: String,

    pub function: Option<RunStepDeltaFunction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaFunction {
    pub name: Option<String>,

    pub arguments: Option<FunctionArguments>,

    pub output: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaCodeInterpreterToolCall {
    pub index: usize,

    pub id: String,

    pub code_interpreter: Option<RunStepDeltaCodeInterpreterDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaCodeInterpreterDetails {
    pub input: Option<String>,

    pub outputs: Option<Vec<RunStepDeltaCodeInterpreterOutput>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunStepDeltaCodeInterpreterOutput {
    Logs(RunStepDeltaCodeInterpreterLogOutput),
    Image(RunStepDeltaCodeInterpreterImageOutput),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaCodeInterpreterLogOutput {
    #[serde(default)]
    pub index: usize,

    pub logs: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaCodeInterpreterImageOutput {
    #[serde(default)]
    pub index: usize,

    pub image: Option<RunStepDeltaCodeInterpreterImageOutputObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaCodeInterpreterImageOutputObject {
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaBingGroundingToolCall {
    pub index: usize,

    pub id: String,

    #[serde(default)]
    pub bing_grounding: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaBingCustomSearchToolCall {
    pub index: usize,

    pub id: String,

    #[serde(default)]
    pub bing_custom_search: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStepDeltaAzureAiSearchToolCall {
    pub index: usize,

    pub id: String,

    #[serde(default)]
    pub azure_ai_search: Map<String, Value>,
}
