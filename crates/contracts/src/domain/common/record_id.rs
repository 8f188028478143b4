use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a backend record.
///
/// The backend issues integer primary keys; some endpoints echo them back as
/// strings, so both shapes are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Zero never identifies a stored record.
    pub fn is_set(&self) -> bool {
        self.0 != 0
    }

    /// Parse an id coming from a text input or a URL segment.
    pub fn parse(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(RecordId)
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(v) => Ok(RecordId(v)),
            Raw::Text(s) => RecordId::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let a: RecordId = serde_json::from_str("5").unwrap();
        let b: RecordId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(a, RecordId(5));
        assert_eq!(a, b);
        assert!(serde_json::from_str::<RecordId>("\"abc\"").is_err());
    }

    #[test]
    fn test_zero_is_not_set() {
        assert!(!RecordId(0).is_set());
        assert!(RecordId(12).is_set());
        assert_eq!(RecordId(12).to_string(), "12");
    }
}
