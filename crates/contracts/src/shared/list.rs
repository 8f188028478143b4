//! List response normalization
//!
//! List endpoints answer with a bare array or a paginated envelope
//! `{"results": [...], "count": ..}`. Both are reduced to the array.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Rows of a list response; no body, `null`, or an unknown shape yield no rows.
pub fn normalize_list(body: Option<Value>) -> Vec<Value> {
    match body {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut map)) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Normalize, then decode each row.
pub fn decode_list<T: DeserializeOwned>(body: Option<Value>) -> Result<Vec<T>, serde_json::Error> {
    normalize_list(body)
        .into_iter()
        .map(serde_json::from_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let rows = normalize_list(Some(json!([{"id": 1}, {"id": 2}])));
        assert_eq!(rows, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_envelope() {
        let rows = normalize_list(Some(json!({"count": 1, "next": null, "results": [{"id": 1}]})));
        assert_eq!(rows, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_empty_payloads() {
        assert!(normalize_list(None).is_empty());
        assert!(normalize_list(Some(Value::Null)).is_empty());
        assert!(normalize_list(Some(json!({"detail": "x"}))).is_empty());
    }

    #[test]
    fn test_decode_list() {
        #[derive(serde::Deserialize)]
        struct Row {
            id: i64,
        }
        let rows: Vec<Row> = decode_list(Some(json!({"results": [{"id": 3}]}))).unwrap();
        assert_eq!(rows[0].id, 3);
    }
}
