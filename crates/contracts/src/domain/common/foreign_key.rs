use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::RecordId;

/// Keys tried, in order, to label a nested related object.
const LABEL_KEYS: [&str; 6] = ["name", "description", "username", "email", "code", "number"];

/// Reference to another record.
///
/// Read side: the backend sends either the bare id or the nested related
/// object (`{"id": 3, "name": "Acme", ..}`); both collapse to the id, keeping
/// a label for display. Write side: always the bare id, or `null` when empty,
/// so a cleared select reaches the backend as an explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKey {
    id: Option<RecordId>,
    label: Option<String>,
}

impl ForeignKey {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn to(id: RecordId) -> Self {
        Self {
            id: Some(id),
            label: None,
        }
    }

    pub fn with_label(id: RecordId, label: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            label: Some(label.into()),
        }
    }

    /// Value handed back by a `<select>`; anything that is not a positive id clears.
    pub fn from_input(value: &str) -> Self {
        match RecordId::parse(value) {
            Ok(id) if id.is_set() => Self::to(id),
            _ => Self::none(),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    /// Drops the label; drafts only carry the id.
    pub fn flatten(&self) -> Self {
        Self {
            id: self.id,
            label: None,
        }
    }

    /// Current value for a `<select>` bound to this key.
    pub fn input_value(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }

    /// Table cell text: label when the backend nested the object, otherwise the id.
    pub fn display(&self) -> String {
        match (&self.label, self.id) {
            (Some(label), _) => label.clone(),
            (None, Some(id)) => format!("#{}", id),
            (None, None) => "-".to_string(),
        }
    }

    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::none()),
            Value::Number(n) => n
                .as_i64()
                .map(|v| Self::from_input(&v.to_string()))
                .ok_or_else(|| format!("Invalid foreign key: {}", n)),
            Value::String(s) if s.trim().is_empty() => Ok(Self::none()),
            Value::String(s) => RecordId::parse(s).map(Self::to),
            Value::Object(map) => {
                let id = match map.get("id") {
                    Some(v) => Self::from_value(v)?.id,
                    None => None,
                };
                let label = LABEL_KEYS
                    .iter()
                    .filter_map(|k| map.get(*k))
                    .find_map(|v| v.as_str().map(str::to_string));
                Ok(Self { id, label })
            }
            other => Err(format!("Invalid foreign key: {}", other)),
        }
    }
}

impl Serialize for ForeignKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.id {
            Some(id) => serializer.serialize_some(&id),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ForeignKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_object_collapses_to_id() {
        let fk: ForeignKey = serde_json::from_value(json!({"id": 5, "name": "Acme"})).unwrap();
        assert_eq!(fk.id(), Some(RecordId(5)));
        assert_eq!(fk.display(), "Acme");
        assert_eq!(fk.flatten().label(), None);
        assert_eq!(serde_json::to_value(&fk).unwrap(), json!(5));
    }

    #[test]
    fn test_bare_and_empty_shapes() {
        let fk: ForeignKey = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(fk.id(), Some(RecordId(7)));
        assert_eq!(fk.display(), "#7");

        let fk: ForeignKey = serde_json::from_value(json!("")).unwrap();
        assert!(fk.is_empty());
        let fk: ForeignKey = serde_json::from_value(json!(null)).unwrap();
        assert!(fk.is_empty());
    }

    #[test]
    fn test_empty_selection_serializes_as_null() {
        let fk = ForeignKey::from_input("");
        assert!(fk.is_empty());
        assert_eq!(serde_json::to_value(&fk).unwrap(), Value::Null);
        assert_eq!(ForeignKey::from_input("12").input_value(), "12");
    }
}
