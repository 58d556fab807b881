//! Auth Endpoints
//!
//! The session itself lives in an HTTP-only cookie handled by the browser.

use reqwest::Method;

use super::{fetch_json, fetch_or_anonymous, Api};
use crate::error::ApiError;
use crate::models::{Credentials, MessageResponse, Registration, Session};

impl Api {
    /// 401 means bad credentials here, not "anonymous"
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        fetch_json(self.auth(Method::POST, "/login").json(credentials))
            .await
            .map_err(|e| match e {
                ApiError::Http { status: 401, message } => ApiError::Unauthorized(message),
                other => other,
            })
    }

    pub async fn register(&self, registration: &Registration) -> Result<MessageResponse, ApiError> {
        fetch_json(self.auth(Method::POST, "/register").json(registration)).await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        fetch_json(self.auth(Method::POST, "/logout")).await
    }

    /// Logged-in user, or `None` for anonymous visitors
    pub async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        fetch_or_anonymous(self.auth(Method::GET, "/me"), None).await
    }
}
