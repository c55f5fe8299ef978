//! Agent Content Core Library
//!
//! This crate converts agent-service payloads (thread messages, run steps,
//! runs and streaming deltas) into a normalized, backend-agnostic content
//! model, and normalized messages back into service input blocks.
//!
//! ```
//! use agent_content_core::protocol::AuthorRole;
//! use agent_content_core::providers::agents::types::ThreadMessage;
//! use agent_content_core::providers::AgentContentGenerator;
//!
//! let message: ThreadMessage = serde_json::from_value(serde_json::json!({
//!     "id": "msg_1",
//!     "content": [{"type": "text", "text": {"value": "Hello", "annotations": []}}]
//! }))
//! .unwrap();
//!
//! let generator = AgentContentGenerator::default();
//! let out = generator
//!     .generate_message_content(AuthorRole::Assistant, &message, None)
//!     .unwrap();
//! assert_eq!(out.content(), Some("Hello"));
//! ```

pub mod config;
pub mod protocol;
pub mod providers;

/// Returns the version of the Agent Content Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
