//! Human-readable summary of backend error bodies
//!
//! Validation failures come back as `{"field": ["message", ..], ..}`; they are
//! shown as one line: `field: message; field2: message2`.

use serde_json::Value;

/// One-line summary, or `None` when the payload carries nothing readable.
pub fn summarize(payload: &Value) -> Option<String> {
    let text = match payload {
        Value::Object(map) => map
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, render(messages)))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Array(items) => join_items(items),
        Value::String(s) => s.trim().to_string(),
        _ => String::new(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// `detail` message of auth-style errors (`{"detail": "..."}`).
pub fn detail(payload: &Value) -> Option<String> {
    payload
        .get("detail")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn render(value: &Value) -> String {
    match value {
        Value::Array(items) => join_items(items),
        Value::Object(_) => summarize(value).unwrap_or_default(),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn join_items(items: &[Value]) -> String {
    items
        .iter()
        .map(render)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_field() {
        let payload = json!({"name": ["This field is required."]});
        assert_eq!(summarize(&payload).unwrap(), "name: This field is required.");
    }

    #[test]
    fn test_fields_keep_backend_order() {
        let payload = json!({
            "name": ["Required.", "Too short."],
            "cuit": "Invalid."
        });
        assert_eq!(
            summarize(&payload).unwrap(),
            "name: Required., Too short.; cuit: Invalid."
        );
    }

    #[test]
    fn test_nested_line_errors() {
        let payload = json!({"items": [{}, {"quantity": ["Must be positive."]}]});
        assert_eq!(summarize(&payload).unwrap(), "items: quantity: Must be positive.");
    }

    #[test]
    fn test_unreadable_payloads() {
        assert_eq!(summarize(&Value::Null), None);
        assert_eq!(summarize(&json!({})), None);
        assert_eq!(detail(&json!({"detail": "No active account"})).unwrap(), "No active account");
    }
}
