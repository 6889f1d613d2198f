//! Backend configuration from environment variables.

use crate::error::{ApiError, ApiResult};

/// Hosted backend project settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Project root, e.g. `https://abcd.supabase.co`
    pub url: String,
    /// Public anonymous key sent as `apikey` on every request.
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Create backend config from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        dotenvy::dotenv().ok();

        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| ApiError::Config("SUPABASE_URL not set".to_string()))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| ApiError::Config("SUPABASE_ANON_KEY not set".to_string()))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "SUPABASE_URL must be an http(s) URL, got {url}"
            )));
        }

        Ok(Self::new(url, anon_key))
    }

    /// Identity endpoint: `{url}/auth/v1/{path}`
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }

    /// Table endpoint: `{url}/rest/v1/{table}`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }
}
