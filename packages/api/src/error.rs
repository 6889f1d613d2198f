//! Errors raised by the catalog and hosted-backend clients.
//!
//! These errors stay on the server. Server functions turn them into
//! `ServerFnError` with their display text, which is what the UI shows.

use thiserror::Error;

/// Result type alias for server-side client operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A request came back with a non-success status.
    #[error("Request to {url} failed with status {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The identity service refused the request (bad credentials, duplicate email, ...).
    #[error("{message}")]
    Auth { message: String },

    /// The caller has no valid session, or its access token was rejected.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Status {
                status: 401 | 403,
                ..
            } | ApiError::NotAuthenticated
        )
    }
}

/// Rejected tokens surface as [`store::StoreError::NotAuthenticated`] so callers can
/// refresh the session and retry.
impl From<ApiError> for store::StoreError {
    fn from(e: ApiError) -> Self {
        if e.is_unauthorized() {
            store::StoreError::NotAuthenticated
        } else {
            store::StoreError::backend(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = ApiError::Status {
            status: 404,
            url: "https://pokeapi.co/api/v2/pokemon/missingno".to_string(),
            message: "Not Found".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("missingno"));
        assert!(error.is_not_found());
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn test_auth_error_shows_provider_message() {
        let error = ApiError::Auth {
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid login credentials");
    }

    #[test]
    fn test_unauthorized_statuses() {
        for status in [401, 403] {
            let error = ApiError::Status {
                status,
                url: "u".to_string(),
                message: String::new(),
            };
            assert!(error.is_unauthorized());
        }
        assert!(ApiError::NotAuthenticated.is_unauthorized());
    }

    #[test]
    fn test_into_store_error() {
        let err: store::StoreError = ApiError::NotAuthenticated.into();
        assert_eq!(err, store::StoreError::NotAuthenticated);

        let expired = ApiError::Status {
            status: 401,
            url: "https://demo.supabase.co/rest/v1/favorites".to_string(),
            message: "JWT expired".to_string(),
        };
        let err: store::StoreError = expired.into();
        assert_eq!(err, store::StoreError::NotAuthenticated);

        let err: store::StoreError = ApiError::Config("SUPABASE_URL not set".to_string()).into();
        assert!(matches!(err, store::StoreError::Backend { .. }));
    }
}
