//! Field deserializers tolerant of the loose typing the backend serializers use.
//!
//! Decimal columns arrive as strings, integer columns as numbers, optional
//! columns as `null`. Drafts keep all of them as text bound to inputs.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Any scalar (or `null`) as a `String`; `null` becomes empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// `true`/`false`, `"true"`/`"false"`, `1`/`0`; `null` is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.as_str(), "true" | "True" | "1"),
        _ => false,
    })
}

/// Date or datetime column reduced to the `YYYY-MM-DD` a date input expects.
pub fn date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = string(deserializer)?;
    Ok(date_part(&s))
}

pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

pub fn date_part(s: &str) -> String {
    s.split('T').next().unwrap_or_default().to_string()
}

/// Blank input as `null`, for optional numeric columns.
pub fn blank_as_null<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.trim() {
        "" => serializer.serialize_none(),
        text => serializer.serialize_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "string")]
        price: String,
        #[serde(default, deserialize_with = "flag")]
        active: bool,
        #[serde(default, deserialize_with = "date")]
        day: String,
    }

    #[test]
    fn test_loose_scalars() {
        let row: Row =
            serde_json::from_str(r#"{"price": 12.5, "active": "true", "day": "2024-03-15T14:02:26Z"}"#)
                .unwrap();
        assert_eq!(row.price, "12.5");
        assert!(row.active);
        assert_eq!(row.day, "2024-03-15");

        let row: Row = serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert_eq!(row.price, "");
        assert!(!row.active);
        assert_eq!(row.day, "");
    }
}
