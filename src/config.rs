//! API Configuration
//!
//! Base URLs are baked in at build time; the browser has no environment.

use tracing::info;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_AUTH_URL: &str = "http://localhost:3000/auth";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base of every `/eventos`, `/grupos`, ... path
    pub api_base: String,
    /// Base of login/register/logout/me
    pub auth_base: String,
    /// How long a toast stays on screen
    pub toast_ms: u32,
    /// Cards per page on list views
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_URL.to_string(),
            auth_base: DEFAULT_AUTH_URL.to_string(),
            toast_ms: 4000,
            page_size: 9,
        }
    }
}

impl ApiConfig {
    pub fn load() -> Self {
        Self {
            api_base: build_var("EVENTOS_API_URL", option_env!("EVENTOS_API_URL"), DEFAULT_API_URL),
            auth_base: build_var(
                "EVENTOS_AUTH_URL",
                option_env!("EVENTOS_AUTH_URL"),
                DEFAULT_AUTH_URL,
            ),
            ..Self::default()
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        join(&self.api_base, path)
    }

    pub fn auth_url(&self, path: &str) -> String {
        join(&self.auth_base, path)
    }
}

/// Log level requested at build time
pub fn log_level() -> &'static str {
    option_env!("EVENTOS_LOG").unwrap_or(DEFAULT_LOG_LEVEL)
}

fn build_var(key: &str, value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            info!("{key} not set at build time, using default: {default}");
            default.to_string()
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_normalises_slashes() {
        let config = ApiConfig {
            api_base: "https://club.example/api/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(config.api_url("/eventos/3"), "https://club.example/api/eventos/3");
        assert_eq!(config.api_url("grupos"), "https://club.example/api/grupos");
    }

    #[test]
    fn test_build_var_falls_back_on_blank() {
        assert_eq!(build_var("X", Some("  "), "def"), "def");
        assert_eq!(build_var("X", None, "def"), "def");
        assert_eq!(build_var("X", Some("https://a"), "def"), "https://a");
    }
}
