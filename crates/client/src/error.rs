use contracts::shared::error_payload;
use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("La solicitud excedió el tiempo de espera")]
    Timeout,

    #[error("Error de red: {0}")]
    Network(String),

    /// Non-2xx response; `payload` is the backend's error body.
    #[error("La solicitud falló con estado {status}")]
    Status { status: u16, payload: Option<Value> },

    /// 401 that could not be recovered by a refresh. The session has been
    /// cleared by the time this is returned.
    #[error("Sesión expirada: {0}")]
    SessionExpired(Box<ApiError>),

    #[error("Error al preparar la solicitud: {0}")]
    Encode(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("Empresa '{0}' no encontrada")]
    TenantNotFound(String),

    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("{0}")]
    Login(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::SessionExpired(inner) => inner.status(),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Status { payload, .. } => payload.as_ref(),
            ApiError::SessionExpired(inner) => inner.payload(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text for an error banner: the backend's field messages joined as
    /// `"field: message; field2: message2"` when present.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { payload: Some(payload), .. } => {
                error_payload::summarize(payload).unwrap_or_else(|| self.to_string())
            }
            _ => self.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout => ApiError::Timeout,
            TransportError::Network(msg) => ApiError::Network(msg),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_joins_field_errors() {
        let err = ApiError::Status {
            status: 400,
            payload: Some(json!({"name": ["This field is required."]})),
        };
        assert_eq!(err.user_message(), "name: This field is required.");
    }

    #[test]
    fn test_user_message_without_payload() {
        let err = ApiError::Status { status: 500, payload: None };
        assert_eq!(err.user_message(), "La solicitud falló con estado 500");
        assert_eq!(
            ApiError::Timeout.user_message(),
            "La solicitud excedió el tiempo de espera"
        );
    }

    #[test]
    fn test_banner_text_is_spanish() {
        let expired = ApiError::SessionExpired(Box::new(ApiError::Status {
            status: 401,
            payload: None,
        }));
        assert_eq!(
            expired.user_message(),
            "Sesión expirada: La solicitud falló con estado 401"
        );
        assert_eq!(
            ApiError::Network("connection refused".into()).user_message(),
            "Error de red: connection refused"
        );
        assert_eq!(
            ApiError::TenantNotFound("acme".into()).user_message(),
            "Empresa 'acme' no encontrada"
        );
    }

    #[test]
    fn test_session_expired_keeps_cause() {
        let err = ApiError::SessionExpired(Box::new(ApiError::Status {
            status: 401,
            payload: None,
        }));
        assert!(err.is_unauthorized());
    }
}
