use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::common::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair issued by `/token/`; also the persisted `authToken` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Claims carried in the access token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>, // expiration timestamp
    #[serde(default)]
    pub iat: Option<i64>, // issued at
}

impl TokenClaims {
    /// Read the payload segment of a JWT. The signature is not checked; the
    /// backend does that on every request.
    pub fn decode(token: &str) -> Result<Self, String> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| "Malformed token: missing payload".to_string())?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| format!("Malformed token payload: {}", e))?;
        serde_json::from_slice(&bytes).map_err(|e| format!("Invalid token claims: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_claims() {
        let token = token_with(r#"{"token_type":"access","exp":100,"iat":40,"user_id":7}"#);
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.user_id, Some(RecordId(7)));
        assert_eq!(claims.exp, Some(100));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(TokenClaims::decode("not-a-jwt").is_err());
        assert!(TokenClaims::decode("a.!!!.c").is_err());
    }
}
