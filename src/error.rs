//! Error Types
//!
//! Single error contract seen by every caller of the transport layer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never got an answer
    #[error("No se pudo conectar con el servidor: {0}")]
    Network(String),

    /// Non-2xx answer; `message` comes from the body when it carries one
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 401 on an endpoint where it is a real failure (bad credentials)
    #[error("{0}")]
    Unauthorized(String),

    /// Body did not match the expected shape
    #[error("Respuesta inesperada del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Text shown to the user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Failure of a multi-step mutation, naming the step that failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositeError {
    #[error("No se pudo crear la noticia: {0}")]
    Create(ApiError),

    #[error("La noticia se creó pero no se pudo fijar: {0}")]
    Pin(ApiError),
}

impl CompositeError {
    /// The first step went through, so server data changed anyway
    pub fn partially_applied(&self) -> bool {
        matches!(self, CompositeError::Pin(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_shows_server_message_verbatim() {
        let err = ApiError::Http {
            status: 409,
            message: "El evento no tiene cupo disponible".to_string(),
        };
        assert_eq!(err.message(), "El evento no tiene cupo disponible");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_composite_messages_name_the_step() {
        let inner = ApiError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        let create = CompositeError::Create(inner.clone());
        let pin = CompositeError::Pin(inner);
        assert!(create.to_string().starts_with("No se pudo crear"));
        assert!(pin.to_string().contains("no se pudo fijar"));
        assert_ne!(create.to_string(), pin.to_string());
        assert!(pin.partially_applied());
        assert!(!create.partially_applied());
    }
}
