//! Protocol module for normalized agent content
//!
//! This module defines the backend-agnostic content model consumed by the
//! orchestration layer. These structures are designed to be:
//! - Independent of any agent service's wire format
//! - Usable for both complete messages and streamed fragments
//! - Faithful to absent vs. empty optional data
//! - Type-safe and serializable

pub mod types;

pub use types::{
    AnnotationContent, AuthorRole, ChatMessage, CitationType, ContentItem, FileReferenceContent,
    FunctionArguments, FunctionCallContent, FunctionResultContent, ImageContent,
    MessageImageFileParam, MessageImageUrlParam, MessageInputContent, StreamingChatMessage,
    StreamingContentItem, StreamingFileReferenceContent, StreamingTextContent, TextContent,
    DEFAULT_FUNCTION_NAME_SEPARATOR,
};
