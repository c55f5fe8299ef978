//! Tests for code interpreter and grounding tool conversion

use agent_content_core::protocol::{AuthorRole, ContentItem, StreamingContentItem};
use agent_content_core::providers::agents::types::{RunStepDeltaToolCallObject, RunStepToolCall};
use agent_content_core::providers::{AgentContentGenerator, ConversionError};
use serde_json::{json, Value};
use test_case::test_case;

fn tool_call(value: Value) -> RunStepToolCall {
    serde_json::from_value(value).expect("valid tool call payload")
}

fn delta(value: Value) -> RunStepDeltaToolCallObject {
    serde_json::from_value(value).expect("valid tool call delta")
}

#[test]
fn test_generate_code_interpreter_content() {
    let out = AgentContentGenerator::default().generate_code_interpreter_content("my_agent", "some_code()");

    assert_eq!(out.role, AuthorRole::Assistant);
    assert_eq!(out.name.as_deref(), Some("my_agent"));
    assert_eq!(out.content(), Some("some_code()"));
    assert_eq!(out.metadata.get("code"), Some(&json!(true)));
}

#[test]
fn test_generate_bing_grounding_content() {
    let call = tool_call(json!({
        "type": "bing_grounding",
        "id": "call_101",
        "bing_grounding": {"requesturl": "https://api.bing.microsoft.com/v7.0/search?q=weather"}
    }));

    let out = AgentContentGenerator::default()
        .generate_bing_grounding_content("my_agent", &call)
        .unwrap();

    assert_eq!(out.role, AuthorRole::Assistant);
    let calls = out.function_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_101");
    assert_eq!(calls[0].name, "bing_grounding");
    assert_eq!(
        calls[0].arguments.as_ref().and_then(|a| a.get("requesturl")),
        Some(&json!("https://api.bing.microsoft.com/v7.0/search?q=weather"))
    );
}

#[test]
fn test_generate_bing_custom_search_content_keeps_stringified_values() {
    let call = tool_call(json!({
        "type": "bing_custom_search",
        "id": "call_102",
        "bing_custom_search": {
            "requesturl": "https://api.bing.microsoft.com/v7.0/custom/search?q=rust",
            "response_metadata": "{'market': 'en-US', 'num_docs_retrieved': 5}"
        }
    }));

    let out = AgentContentGenerator::default()
        .generate_bing_grounding_content("my_agent", &call)
        .unwrap();

    let calls = out.function_calls();
    assert_eq!(calls[0].name, "bing_custom_search");
    let arguments = calls[0].arguments.as_ref().unwrap();
    assert_eq!(
        arguments.get("response_metadata"),
        Some(&json!("{'market': 'en-US', 'num_docs_retrieved': 5}"))
    );
    assert_eq!(arguments.as_mapping().map(|m| m.len()), Some(2));
}

#[test]
fn test_generate_azure_ai_search_content() {
    let call = tool_call(json!({
        "type": "azure_ai_search",
        "id": "call_201",
        "azure_ai_search": {
            "input": "hotel near the sea",
            "output": "{'summary': 'ok', 'metadata': {'urls': ['doc_0']}}"
        }
    }));

    let out = AgentContentGenerator::default()
        .generate_azure_ai_search_content("searcher", &call)
        .unwrap();

    assert_eq!(out.name.as_deref(), Some("searcher"));
    let calls = out.function_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_201");
    assert_eq!(calls[0].function_name, "azure_ai_search");
    assert_eq!(
        calls[0].arguments.as_ref().and_then(|a| a.get("input")),
        Some(&json!("hotel near the sea"))
    );
    assert_eq!(
        calls[0].arguments.as_ref().and_then(|a| a.get("output")),
        Some(&json!("{'summary': 'ok', 'metadata': {'urls': ['doc_0']}}"))
    );
}

#[test_case(json!({"type": "azure_ai_search", "id": "a", "azure_ai_search": {}}), "azure_ai_search"; "azure search")]
#[test_case(json!({"type": "function", "id": "f", "function": {"name": "x"}}), "function"; "function")]
#[test_case(json!({"type": "file_search", "id": "s"}), "unknown"; "unknown kind")]
fn test_bing_grounding_rejects_other_kinds(payload: Value, actual_kind: &str) {
    let result = AgentContentGenerator::default()
        .generate_bing_grounding_content("agent", &tool_call(payload));

    match result {
        Err(ConversionError::UnsupportedToolCall { actual, .. }) => assert_eq!(actual, actual_kind),
        other => panic!("Expected unsupported tool call, got {:?}", other),
    }
}

#[test]
fn test_azure_ai_search_rejects_bing_call() {
    let call = tool_call(json!({"type": "bing_grounding", "id": "b", "bing_grounding": {}}));
    let result = AgentContentGenerator::default().generate_azure_ai_search_content("agent", &call);
    assert!(matches!(
        result,
        Err(ConversionError::UnsupportedToolCall { .. })
    ));
}

#[test]
fn test_streaming_bing_grounding_content() {
    let details = delta(json!({
        "tool_calls": [
            {
                "type": "bing_grounding",
                "index": 0,
                "id": "call_1",
                "bing_grounding": {"requesturl": "https://example.com/search?q=a"}
            },
            {
                "type": "function",
                "index": 1,
                "id": "fn",
                "function": {"name": "skip"}
            },
            {
                "type": "bing_custom_search",
                "index": 2,
                "id": "call_2",
                "bing_custom_search": {"requesturl": "https://example.com/custom?q=b"}
            }
        ]
    }));

    let out = AgentContentGenerator::default()
        .generate_streaming_bing_grounding_content("agent", &details)
        .expect("grounding fragment");

    assert_eq!(out.items.len(), 2);
    let names: Vec<(&str, Option<usize>)> = out
        .items
        .iter()
        .filter_map(|item| match item {
            StreamingContentItem::FunctionCall(call) => Some((call.name.as_str(), call.index)),
            _ => None,
        })
        .collect();
    assert_eq!(
        names,
        vec![("bing_grounding", Some(0)), ("bing_custom_search", Some(2))]
    );
}

#[test]
fn test_streaming_search_content_without_matching_calls() {
    let generator = AgentContentGenerator::default();

    let empty = delta(json!({"tool_calls": []}));
    assert!(generator
        .generate_streaming_bing_grounding_content("agent", &empty)
        .is_none());
    assert!(generator
        .generate_streaming_azure_ai_search_content("agent", &empty)
        .is_none());

    let only_functions = delta(json!({
        "tool_calls": [{"type": "function", "index": 0, "id": "fn", "function": {"name": "f"}}]
    }));
    assert!(generator
        .generate_streaming_azure_ai_search_content("agent", &only_functions)
        .is_none());
}

#[test]
fn test_streaming_azure_ai_search_content() {
    let details = delta(json!({
        "tool_calls": [
            {
                "type": "azure_ai_search",
                "index": 0,
                "id": "search_1",
                "azure_ai_search": {"input": "query", "output": "{'summary': 'done'}"}
            }
        ]
    }));

    let out = AgentContentGenerator::default()
        .generate_streaming_azure_ai_search_content("agent", &details)
        .expect("search fragment");

    match &out.items[0] {
        StreamingContentItem::FunctionCall(call) => {
            assert_eq!(call.id, "search_1");
            assert_eq!(call.name, "azure_ai_search");
            assert_eq!(
                call.arguments.as_ref().and_then(|a| a.get("output")),
                Some(&json!("{'summary': 'done'}"))
            );
        }
        other => panic!("Expected function call, got {:?}", other),
    }
}

#[test]
fn test_code_interpreter_content_maps_to_input_text() {
    let out = AgentContentGenerator::default().generate_code_interpreter_content("coder", "x = 1");
    match &out.items[..] {
        [ContentItem::Text(text)] => assert_eq!(text.text, "x = 1"),
        other => panic!("Expected a single text item, got {:?}", other),
    }
}
