//! HTTP API Wrappers
//!
//! Frontend bindings to the remote API, organized by domain. Every call
//! carries credentials and every failure comes back as [`ApiError`].

mod auth;
mod events;
mod groups;
mod news;
mod roles;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;

pub use events::EventFilter;

/// Remote API client; cheap to clone
#[derive(Clone, Debug)]
pub struct Api {
    config: ApiConfig,
    client: Client,
}

impl Api {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn api(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, self.config.api_url(path))
    }

    fn auth(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, self.config.auth_url(path))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        debug!(%method, %url, "request");
        with_credentials(self.client.request(method, url))
    }
}

/// Session cookies go with every request
#[cfg(target_arch = "wasm32")]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}

// ========================
// Response handling
// ========================

/// Send and return the body of a 2xx answer
async fn send(request: RequestBuilder) -> Result<String, ApiError> {
    let response = request.send().await.map_err(|e| {
        warn!(error = %e, "network failure");
        ApiError::Network(e.to_string())
    })?;

    let status = response.status();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if status.is_success() {
        Ok(body)
    } else {
        let err = error_from_response(status, &body);
        warn!(%url, status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }
}

async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    parse_body(&send(request).await?)
}

async fn fetch_list<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, ApiError> {
    parse_list(&send(request).await?)
}

/// Like [`fetch_json`] but a 401 yields `fallback`: anonymous visitors may
/// browse pages that ask for per-user state.
async fn fetch_or_anonymous<T: DeserializeOwned>(
    request: RequestBuilder,
    fallback: T,
) -> Result<T, ApiError> {
    match fetch_json(request).await {
        Err(e) if e.status() == Some(401) => {
            debug!("unauthenticated, using anonymous default");
            Ok(fallback)
        }
        other => other,
    }
}

/// Build the error for a non-2xx answer.
///
/// The body's `message` wins over its `error`; without either the HTTP
/// status text is used.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"].iter().find_map(|field| {
            value
                .get(field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        })
    });

    let message = from_body
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a list endpoint's body.
///
/// `{"message": ...}`, `null` and an empty body all mean "no data".
pub(crate) fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = parse_body(body)?;
    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
        }
        Value::Null => Ok(Vec::new()),
        Value::Object(ref map) if map.get("message").is_some_and(Value::is_string) => {
            debug!("empty list sentinel received");
            Ok(Vec::new())
        }
        other => Err(ApiError::Decode(format!("se esperaba una lista: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{News, RegistrationStatus};

    #[test]
    fn test_message_sentinel_is_empty_list() {
        let news: Vec<News> = parse_list(r#"{"message": "No hay noticias"}"#).unwrap();
        assert!(news.is_empty());
        let news: Vec<News> = parse_list("null").unwrap();
        assert!(news.is_empty());
        let news: Vec<News> = parse_list("").unwrap();
        assert!(news.is_empty());
    }

    #[test]
    fn test_array_body_decodes() {
        let news: Vec<News> = parse_list(
            r#"[{"id": 1, "titulo": "Reunión Anual", "fecha": "2025-01-02"}]"#,
        )
        .unwrap();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "Reunión Anual");
    }

    #[test]
    fn test_other_object_is_decode_error() {
        let result: Result<Vec<News>, _> = parse_list(r#"{"error": "boom"}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_error_prefers_message_then_error_then_status() {
        let err = error_from_response(
            StatusCode::CONFLICT,
            r#"{"message": "Ya estás inscrito", "error": "duplicate"}"#,
        );
        assert_eq!(err, ApiError::Http { status: 409, message: "Ya estás inscrito".to_string() });

        let err = error_from_response(StatusCode::BAD_REQUEST, r#"{"error": "Cupo completo"}"#);
        assert_eq!(err.message(), "Cupo completo");

        let err = error_from_response(StatusCode::NOT_FOUND, "<html>not json</html>");
        assert_eq!(err.message(), "Not Found");

        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message": "  "}"#);
        assert_eq!(err.message(), "Internal Server Error");
    }

    #[test]
    fn test_unknown_status_without_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(error_from_response(status, "").message(), "HTTP 599");
    }

    #[test]
    fn test_parse_body_reports_decode_errors() {
        let result: Result<RegistrationStatus, _> = parse_body("{}");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
