//! Citation annotation classification
//!
//! The service reports three sibling annotation shapes. Classification looks
//! only at which citation detail object is populated; the `type` field is
//! used for error reporting and nothing else.

use tracing::warn;

use super::types::{MessageDeltaTextAnnotation, MessageTextAnnotation};
use crate::protocol::{AnnotationContent, CitationType};
use crate::providers::error::{ConversionError, ConversionResult};

/// Convert an annotation of a complete message
///
/// The quote is the annotation's display text for all three citation kinds.
pub fn generate_annotation_content(
    annotation: &MessageTextAnnotation,
) -> ConversionResult<AnnotationContent> {
    let (citation_type, file_id, url, title) = if let Some(citation) = &annotation.file_citation {
        (
            CitationType::FileCitation,
            Some(citation.file_id.clone()),
            None,
            None,
        )
    } else if let Some(path) = &annotation.file_path {
        (CitationType::FilePath, Some(path.file_id.clone()), None, None)
    } else if let Some(citation) = &annotation.url_citation {
        (
            CitationType::UrlCitation,
            None,
            Some(citation.url.clone()),
            citation.title.clone(),
        )
    } else {
        return Err(missing_details(annotation.annotation_type.as_deref()));
    };

    Ok(AnnotationContent {
        file_id,
        url,
        title,
        quote: annotation.text.clone(),
        start_index: annotation.start_index,
        end_index: annotation.end_index,
        citation_type,
    })
}

/// Convert an annotation of a streamed text delta
///
/// Streamed URL citations carry no display text, so their quote is always `None`.
pub fn generate_streaming_annotation_content(
    annotation: &MessageDeltaTextAnnotation,
) -> ConversionResult<AnnotationContent> {
    let (citation_type, file_id, url, title, quote) =
        if let Some(citation) = &annotation.file_citation {
            (
                CitationType::FileCitation,
                citation.file_id.clone(),
                None,
                None,
                annotation.text.clone(),
            )
        } else if let Some(path) = &annotation.file_path {
            (
                CitationType::FilePath,
                path.file_id.clone(),
                None,
                None,
                annotation.text.clone(),
            )
        } else if let Some(citation) = &annotation.url_citation {
            (
                CitationType::UrlCitation,
                None,
                Some(citation.url.clone()),
                citation.title.clone(),
                None,
            )
        } else {
            return Err(missing_details(annotation.annotation_type.as_deref()));
        };

    Ok(AnnotationContent {
        file_id,
        url,
        title,
        quote,
        start_index: annotation.start_index,
        end_index: annotation.end_index,
        citation_type,
    })
}

fn missing_details(annotation_type: Option<&str>) -> ConversionError {
    warn!(
        annotation_type = annotation_type.unwrap_or("<none>"),
        "annotation has no citation details"
    );
    ConversionError::MissingCitationDetails {
        annotation_type: annotation_type.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::agents::types::{
        MessageTextFileCitationDetails, MessageTextUrlCitationDetails,
    };

    #[test]
    fn test_file_citation_wins_over_other_details() {
        let annotation = MessageTextAnnotation {
            text: Some("【0†source】".to_string()),
            file_citation: Some(MessageTextFileCitationDetails {
                file_id: "file_a".to_string(),
                quote: Some("ignored".to_string()),
            }),
            url_citation: Some(MessageTextUrlCitationDetails {
                url: "http://example.com".to_string(),
                title: None,
            }),
            ..Default::default()
        };

        let out = generate_annotation_content(&annotation).unwrap();
        assert_eq!(out.citation_type, CitationType::FileCitation);
        assert_eq!(out.file_id.as_deref(), Some("file_a"));
        assert_eq!(out.quote.as_deref(), Some("【0†source】"));
        assert_eq!(out.url, None);
    }

    #[test]
    fn test_no_details_is_an_error() {
        let annotation = MessageTextAnnotation {
            annotation_type: Some("file_citation".to_string()),
            ..Default::default()
        };
        let err = generate_annotation_content(&annotation).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::MissingCitationDetails { annotation_type: Some(ref t) } if t == "file_citation"
        ));

        let err = generate_streaming_annotation_content(&MessageDeltaTextAnnotation::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConversionError::MissingCitationDetails { annotation_type: None }
        ));
    }
}
