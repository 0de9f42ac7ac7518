//! Text extraction from provider response payloads.
//!
//! Payloads are untrusted JSON. Every step below checks the value's type
//! before reading it and yields `None` on any mismatch, so the public entry
//! point is total: it returns an empty string instead of failing.

use serde_json::Value;

use crate::domain::ModelFamily;

/// Top-level string fields tried, in order, after the structured shapes.
const FLAT_TEXT_FIELDS: [&str; 3] = ["outputText", "completion", "response"];

/// Extract the answer text from `payload`.
///
/// Returns an empty string when no text is found; the caller decides what
/// to show instead.
pub fn extract_text(payload: &Value, family: ModelFamily) -> String {
    let text = match family {
        ModelFamily::TextCompletion => generation_text(payload),
        ModelFamily::Chat => nested_output_text(payload)
            .or_else(|| choices_text(payload))
            .or_else(|| flat_field_text(payload)),
    };
    text.unwrap_or_default()
}

/// `{"generation": "..."}`
fn generation_text(payload: &Value) -> Option<String> {
    payload
        .get("generation")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}

/// `{"output": {"message": {"content": [{"type": "text", "text": "..."}]}}}`
fn nested_output_text(payload: &Value) -> Option<String> {
    let content = payload
        .get("output")
        .filter(|v| v.is_object())?
        .get("message")
        .filter(|v| v.is_object())?
        .get("content")?
        .as_array()?;
    non_blank(&join_text_blocks(content))
}

/// `{"choices": [{"text": "..."}]}` or `{"choices": [{"message": {"content": ...}}]}`
fn choices_text(payload: &Value) -> Option<String> {
    let choice = payload
        .get("choices")?
        .as_array()?
        .first()?
        .as_object()?;

    if let Some(text) = choice.get("text").and_then(Value::as_str).and_then(non_blank) {
        return Some(text);
    }

    let content = choice
        .get("message")
        .filter(|v| v.is_object())?
        .get("content")?;
    match content {
        Value::String(s) => non_blank(s),
        Value::Array(blocks) => non_blank(&join_text_blocks(blocks)),
        _ => None,
    }
}

/// `{"outputText": "..."}`, `{"completion": "..."}`, `{"response": "..."}`
fn flat_field_text(payload: &Value) -> Option<String> {
    FLAT_TEXT_FIELDS
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str).and_then(non_blank))
}

/// Concatenate the `text` of every `{"type": "text"}` block, in order.
/// Blocks of other types, or with a non-string `text`, are skipped.
fn join_text_blocks(blocks: &[Value]) -> String {
    blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect()
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chat(payload: Value) -> String {
        extract_text(&payload, ModelFamily::Chat)
    }

    #[test]
    fn nested_output_concatenates_text_blocks() {
        let payload = json!({
            "output": {"message": {"content": [
                {"type": "text", "text": "A"},
                {"type": "text", "text": "B"}
            ]}}
        });
        assert_eq!(chat(payload), "AB");
    }

    #[test]
    fn nested_output_skips_foreign_blocks() {
        let payload = json!({
            "output": {"message": {"content": [
                {"type": "image", "text": "ignored"},
                {"type": "text", "text": 42},
                {"text": "untyped"},
                "bare string",
                {"type": "text", "text": "  kept  "}
            ]}}
        });
        assert_eq!(chat(payload), "kept");
    }

    #[test]
    fn blank_nested_output_falls_through_to_choices() {
        let payload = json!({
            "output": {"message": {"content": [{"type": "text", "text": "   "}]}},
            "choices": [{"text": "from choices"}]
        });
        assert_eq!(chat(payload), "from choices");
    }

    #[test]
    fn choice_text_is_trimmed() {
        assert_eq!(chat(json!({"choices": [{"text": "  hello  "}]})), "hello");
    }

    #[test]
    fn choice_message_string_content() {
        let payload = json!({"choices": [{"message": {"role": "assistant", "content": " hi "}}]});
        assert_eq!(chat(payload), "hi");
    }

    #[test]
    fn choice_message_block_content() {
        let payload = json!({"choices": [{"message": {"content": [{"type": "text", "text": "X"}]}}]});
        assert_eq!(chat(payload), "X");
    }

    #[test]
    fn blank_choice_text_uses_message() {
        let payload = json!({"choices": [{"text": "  ", "message": {"content": "msg"}}]});
        assert_eq!(chat(payload), "msg");
    }

    #[test]
    fn only_first_choice_is_considered() {
        let payload = json!({"choices": [{"text": ""}, {"text": "second"}]});
        assert_eq!(chat(payload), "");
    }

    #[test]
    fn non_object_first_choice_falls_through_to_flat_fields() {
        let payload = json!({"choices": ["raw"], "completion": "flat"});
        assert_eq!(chat(payload), "flat");
    }

    #[test]
    fn flat_fields_in_priority_order() {
        assert_eq!(chat(json!({"outputText": "fallback-value"})), "fallback-value");
        assert_eq!(
            chat(json!({"response": "third", "completion": "second", "outputText": "  "})),
            "second"
        );
        assert_eq!(chat(json!({"response": " third "})), "third");
        assert_eq!(chat(json!({"outputText": 7, "response": "r"})), "r");
    }

    #[test]
    fn unrecognised_shapes_yield_empty() {
        for payload in [
            json!({}),
            Value::Null,
            json!({"choices": []}),
            json!({"output": {}}),
            json!({"output": "text"}),
            json!({"output": {"message": "text"}}),
            json!({"output": {"message": {"content": "not a list"}}}),
            json!({"choices": {"text": "not a list"}}),
            json!({"choices": [{"message": {"content": 5}}]}),
            json!([1, 2, 3]),
            json!("string payload"),
            json!(12),
        ] {
            assert_eq!(chat(payload.clone()), "", "payload: {payload}");
        }
    }

    #[test]
    fn generation_is_trimmed_for_text_completion() {
        let payload = json!({"generation": "  4  ", "stop_reason": "stop"});
        assert_eq!(extract_text(&payload, ModelFamily::TextCompletion), "4");
    }

    #[test]
    fn text_completion_ignores_chat_shapes() {
        let payload = json!({"choices": [{"text": "chat"}], "generation": 3});
        assert_eq!(extract_text(&payload, ModelFamily::TextCompletion), "");
        assert_eq!(extract_text(&Value::Null, ModelFamily::TextCompletion), "");
    }
}
