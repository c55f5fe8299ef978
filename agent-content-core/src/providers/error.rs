//! Conversion error types

use thiserror::Error;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Errors that can occur while converting agent-service payloads
///
/// Missing optional data is never an error; these variants cover inputs the
/// converters cannot interpret at all.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// An annotation carried none of the known citation sub-objects
    #[error("Annotation{} has no file_citation, file_path or url_citation details", .annotation_type.as_deref().map(|t| format!(" of type '{}'", t)).unwrap_or_default())]
    MissingCitationDetails { annotation_type: Option<String> },

    /// A converter was handed a tool call of a kind it does not handle
    #[error("Unsupported tool call: expected {expected}, got {actual}")]
    UnsupportedToolCall { expected: String, actual: String },

    /// Streamed fragments that do not belong to the same message
    #[error("Incompatible streaming chunks: {0}")]
    IncompatibleChunks(String),

    /// Structurally invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_citation_message() {
        let err = ConversionError::MissingCitationDetails {
            annotation_type: Some("mystery".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Annotation of type 'mystery' has no file_citation, file_path or url_citation details"
        );

        let err = ConversionError::MissingCitationDetails {
            annotation_type: None,
        };
        assert!(err.to_string().starts_with("Annotation has no"));
    }

    #[test]
    fn test_from_serde_error() {
        let err: ConversionError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConversionError::Serialization(_)));
    }
}
