//! Normalized content types shared by every agent backend
//!
//! This module contains the backend-agnostic content model produced by the
//! converters in [`crate::providers`]. The design prioritizes:
//! - Type safety through closed enums for content kinds and citation types
//! - Preservation of absent vs. empty optional fields exactly as supplied
//! - Streaming support through dedicated fragment types
//! - Traceability through free-form metadata maps

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::providers::error::{ConversionError, ConversionResult};

/// Separator between plugin and function name in a fully qualified function name
pub const DEFAULT_FUNCTION_NAME_SEPARATOR: &str = "-";

/// Role of a message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    /// System instructions
    System,
    /// End-user input
    User,
    /// Agent (model) output
    Assistant,
    /// Tool output fed back to the agent
    Tool,
    /// Developer instructions
    Developer,
}

impl AuthorRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Developer => "developer",
        }
    }
}

impl std::fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuthorRole {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "tool" => Ok(Self::Tool),
            "developer" => Ok(Self::Developer),
            other => Err(ConversionError::InvalidInput(format!(
                "unknown author role '{}'",
                other
            ))),
        }
    }
}

/// Kind of citation carried by an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationType {
    /// Quote from an uploaded file
    FileCitation,
    /// Path to a file produced by a tool
    FilePath,
    /// Web citation
    UrlCitation,
}

impl CitationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileCitation => "file_citation",
            Self::FilePath => "file_path",
            Self::UrlCitation => "url_citation",
        }
    }
}

impl std::fmt::Display for CitationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

/// Image referenced by URI or carried inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImageContent {
    /// Remote location of the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Url>,

    /// Base64 payload for inline images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Reference to a file stored by the agent service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReferenceContent {
    pub file_id: String,
}

/// Citation attached to a span of message text
///
/// Every optional field keeps the three states supplied by the service:
/// absent (`None`), empty (`Some("")`) and populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationContent {
    /// Cited file, for file citations and file paths
    pub file_id: Option<String>,

    /// Cited web location, for URL citations
    pub url: Option<String>,

    /// Title of the cited web page
    pub title: Option<String>,

    /// Display text the annotation replaces in the message
    pub quote: Option<String>,

    /// Character offset where the annotated span starts
    pub start_index: Option<i64>,

    /// Character offset where the annotated span ends
    pub end_index: Option<i64>,

    pub citation_type: CitationType,
}

/// Arguments of a function call, kept in whatever shape the source provided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionArguments {
    /// Structured key/value arguments
    Mapping(serde_json::Map<String, serde_json::Value>),
    /// Pre-serialized arguments (usually a JSON document or a fragment of one)
    Raw(String),
}

impl FunctionArguments {
    /// Look up a top-level argument of a structured mapping
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        match self {
            Self::Mapping(map) => map.get(key),
            Self::Raw(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Mapping(_) => None,
            Self::Raw(raw) => Some(raw),
        }
    }

    /// Render the arguments as a string without reinterpreting them
    ///
    /// Raw arguments are returned verbatim; mappings are JSON-encoded.
    pub fn to_raw_string(&self) -> ConversionResult<String> {
        match self {
            Self::Mapping(map) => Ok(serde_json::to_string(map)?),
            Self::Raw(raw) => Ok(raw.clone()),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for FunctionArguments {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Mapping(map)
    }
}

impl From<String> for FunctionArguments {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for FunctionArguments {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// A function invocation requested by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallContent {
    /// Identifier used to correlate the later result
    pub id: String,

    /// Position of the call within a streamed tool-call list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Fully qualified name as reported by the service
    pub name: String,

    /// Plugin part of the name, when the name is qualified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,

    /// Function part of the name
    pub function_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<FunctionArguments>,
}

impl FunctionCallContent {
    /// Create a call, splitting `name` on the default separator
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Option<FunctionArguments>,
    ) -> Self {
        Self::with_separator(id, name, arguments, DEFAULT_FUNCTION_NAME_SEPARATOR)
    }

    /// Create a call, splitting `name` into plugin and function parts on `separator`
    pub fn with_separator(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Option<FunctionArguments>,
        separator: &str,
    ) -> Self {
        let name = name.into();
        let (plugin_name, function_name) = split_function_name(&name, separator);
        Self {
            id: id.into(),
            index: None,
            name,
            plugin_name,
            function_name,
            arguments,
        }
    }

    /// Set the streamed position index
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Split `plugin<sep>function` into its parts; unqualified names have no plugin
fn split_function_name(name: &str, separator: &str) -> (Option<String>, String) {
    if separator.is_empty() {
        return (None, name.to_string());
    }
    match name.split_once(separator) {
        Some((plugin, function)) if !plugin.is_empty() && !function.is_empty() => {
            (Some(plugin.to_string()), function.to_string())
        }
        _ => (None, name.to_string()),
    }
}

/// Result of a function invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResultContent {
    /// Identifier of the originating call
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,

    pub function_name: String,

    /// Tool output, passed through without interpretation
    pub result: serde_json::Value,
}

impl FunctionResultContent {
    /// Build the result paired with `call`
    pub fn for_call(call: &FunctionCallContent, result: serde_json::Value) -> Self {
        Self {
            id: call.id.clone(),
            plugin_name: call.plugin_name.clone(),
            function_name: call.function_name.clone(),
            result,
        }
    }

    /// Text form of the result: strings verbatim, everything else JSON-encoded
    pub fn result_text(&self) -> String {
        match &self.result {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// One item of a complete message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text(TextContent),
    Image(ImageContent),
    FileReference(FileReferenceContent),
    Annotation(AnnotationContent),
    FunctionCall(FunctionCallContent),
    FunctionResult(FunctionResultContent),
}

impl ContentItem {
    /// Create a text item
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextContent { text: text.into() })
    }

    /// Create a file reference item
    pub fn file_reference(file_id: impl Into<String>) -> Self {
        Self::FileReference(FileReferenceContent {
            file_id: file_id.into(),
        })
    }

    /// Create an image item pointing at `uri`
    pub fn image_uri(uri: Url) -> Self {
        Self::Image(ImageContent {
            uri: Some(uri),
            ..Default::default()
        })
    }

    /// Short name of the item kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::FileReference(_) => "file_reference",
            Self::Annotation(_) => "annotation",
            Self::FunctionCall(_) => "function_call",
            Self::FunctionResult(_) => "function_result",
        }
    }
}

/// Incremental text of a streamed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingTextContent {
    pub text: String,
    pub choice_index: usize,
}

/// File reference carried by a streamed fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingFileReferenceContent {
    pub file_id: Option<String>,
}

/// One item of a streamed message fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamingContentItem {
    Text(StreamingTextContent),
    FileReference(StreamingFileReferenceContent),
    Annotation(AnnotationContent),
    FunctionCall(FunctionCallContent),
}

/// A complete message in normalized form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: AuthorRole,

    /// Name of the agent that authored the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Ordered content items
    #[serde(default)]
    pub items: Vec<ContentItem>,

    /// Traceability data (step/run identifiers, usage, flags)
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ChatMessage {
    /// Create an empty message with `role`
    pub fn new(role: AuthorRole) -> Self {
        Self {
            role,
            name: None,
            items: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Set the author name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append an item
    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.items.push(item);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Text of the first text item, if any
    pub fn content(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            ContentItem::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
    }

    /// All annotations, in item order
    pub fn annotations(&self) -> Vec<&AnnotationContent> {
        self.items
            .iter()
            .filter_map(|item| match item {
                ContentItem::Annotation(annotation) => Some(annotation),
                _ => None,
            })
            .collect()
    }

    /// All function calls, in item order
    pub fn function_calls(&self) -> Vec<&FunctionCallContent> {
        self.items
            .iter()
            .filter_map(|item| match item {
                ContentItem::FunctionCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }
}

/// A fragment of a message that is still being streamed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingChatMessage {
    pub role: AuthorRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Which choice of the response this fragment belongs to
    pub choice_index: usize,

    #[serde(default)]
    pub items: Vec<StreamingContentItem>,

    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl StreamingChatMessage {
    /// Create an empty fragment
    pub fn new(role: AuthorRole, choice_index: usize) -> Self {
        Self {
            role,
            name: None,
            choice_index,
            items: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Concatenated text of this fragment's text items
    pub fn content(&self) -> String {
        self.items
            .iter()
            .filter_map(|item| match item {
                StreamingContentItem::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Append a later fragment of the same message
    ///
    /// Items are appended in order and metadata from `other` overrides keys
    /// already present. Fragments of different roles or choices cannot be merged.
    pub fn merge(mut self, other: StreamingChatMessage) -> ConversionResult<Self> {
        if self.role != other.role {
            return Err(ConversionError::IncompatibleChunks(format!(
                "cannot merge a {} fragment into a {} message",
                other.role, self.role
            )));
        }
        if self.choice_index != other.choice_index {
            return Err(ConversionError::IncompatibleChunks(format!(
                "cannot merge choice {} into choice {}",
                other.choice_index, self.choice_index
            )));
        }
        if self.name.is_none() {
            self.name = other.name;
        }
        self.items.extend(other.items);
        self.metadata.extend(other.metadata);
        Ok(self)
    }
}

/// Content block accepted by the agent service when creating a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageInputContent {
    Text { text: String },
    ImageUrl { image_url: MessageImageUrlParam },
    ImageFile { image_file: MessageImageFileParam },
}

/// Image URL parameter of an input content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageImageUrlParam {
    pub url: String,
}

/// Image file parameter of an input content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageImageFileParam {
    pub file_id: String,
}
