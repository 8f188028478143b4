use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Tenant identifier as carried in the `X-Tenant-ID` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(TenantId(s)),
            Value::Number(n) => Ok(TenantId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "Invalid tenant id: {}",
                other
            ))),
        }
    }
}

/// Row of `/tenants/?name=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_ids() {
        let t: Tenant = serde_json::from_str(r#"{"id": 3, "name": "acme"}"#).unwrap();
        assert_eq!(t.id.as_str(), "3");
        let t: Tenant = serde_json::from_str(r#"{"id": "a1b2"}"#).unwrap();
        assert_eq!(t.id, TenantId::new("a1b2"));
    }
}
