//! Backend adapters and conversion error types
//!
//! Each backend module translates one agent service's payloads into the
//! normalized content model of [`crate::protocol`].

pub mod agents;
pub mod error;

pub use agents::{
    generate_annotation_content, generate_streaming_annotation_content, get_message_contents,
    AgentContentGenerator,
};
pub use error::{ConversionError, ConversionResult};
