//! Session data types.
//!
//! The browser never sees the identity service's tokens: the access and refresh
//! tokens live in the server-side session and the browser only holds the session
//! cookie.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::backend::{BackendClient, BackendSession};
use crate::error::ApiError;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";
/// Key for storing the identity service's access token in session.
pub const SESSION_ACCESS_TOKEN_KEY: &str = "access_token";
/// Key for storing the refresh token that renews an expired access token.
pub const SESSION_REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Session data stored in the session store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub user_id: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionData {
    /// `(user_id, access_token)` when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.user_id, &self.access_token) {
            (Some(user_id), Some(token)) => Some((user_id.as_str(), token.as_str())),
            _ => None,
        }
    }
}

/// Read the signed-in user's ids from the session.
pub async fn current_session(session: &Session) -> Result<SessionData, String> {
    let user_id: Option<String> = session
        .get(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| e.to_string())?;
    let access_token: Option<String> = session
        .get(SESSION_ACCESS_TOKEN_KEY)
        .await
        .map_err(|e| e.to_string())?;
    let refresh_token: Option<String> = session
        .get(SESSION_REFRESH_TOKEN_KEY)
        .await
        .map_err(|e| e.to_string())?;
    Ok(SessionData {
        user_id,
        access_token,
        refresh_token,
    })
}

/// Remember a fresh identity session. The session id is cycled to avoid fixation.
pub async fn store_session(session: &Session, signed_in: &BackendSession) -> Result<(), String> {
    session.cycle_id().await.map_err(|e| e.to_string())?;
    save_tokens(session, signed_in).await
}

async fn save_tokens(session: &Session, signed_in: &BackendSession) -> Result<(), String> {
    session
        .insert(SESSION_USER_ID_KEY, signed_in.user.id.clone())
        .await
        .map_err(|e| e.to_string())?;
    session
        .insert(SESSION_ACCESS_TOKEN_KEY, signed_in.access_token.clone())
        .await
        .map_err(|e| e.to_string())?;
    match &signed_in.refresh_token {
        Some(token) => session
            .insert(SESSION_REFRESH_TOKEN_KEY, token.clone())
            .await
            .map_err(|e| e.to_string())?,
        None => {
            session
                .remove::<String>(SESSION_REFRESH_TOKEN_KEY)
                .await
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

/// Renew an expired access token with the stored refresh token.
///
/// Returns the new session after saving its tokens, or `None` when there is no
/// refresh token or the identity service refuses it. The caller decides whether
/// that ends the session.
pub async fn refresh_session(
    session: &Session,
    client: &BackendClient,
) -> Result<Option<BackendSession>, String> {
    let data = current_session(session).await?;
    let Some(refresh_token) = data.refresh_token else {
        return Ok(None);
    };

    match client.refresh_session(&refresh_token).await {
        Ok(refreshed) => {
            save_tokens(session, &refreshed).await?;
            tracing::info!("Refreshed access token for {}", refreshed.user.id);
            Ok(Some(refreshed))
        }
        Err(ApiError::Auth { message }) => {
            tracing::info!("Refresh token refused: {}", message);
            Ok(None)
        }
        Err(e) => Err(e.to_string()),
    }
}

pub async fn clear_session(session: &Session) -> Result<(), String> {
    session.flush().await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::testing::{backend_stub, PASSWORD, REFRESH_TOKEN};

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[test]
    fn test_credentials_need_both_keys() {
        let mut data = SessionData::default();
        assert!(data.credentials().is_none());

        data.user_id = Some("u-1".to_string());
        assert!(data.credentials().is_none());

        data.access_token = Some("jwt".to_string());
        assert_eq!(data.credentials(), Some(("u-1", "jwt")));
    }

    #[tokio::test]
    async fn test_store_session_keeps_refresh_token() {
        let (client, _) = backend_stub().await;
        let session = new_session();

        let signed_in = client
            .sign_in_with_password("ash@kanto.org", PASSWORD)
            .await
            .unwrap();
        store_session(&session, &signed_in).await.unwrap();

        let data = current_session(&session).await.unwrap();
        assert_eq!(data.credentials(), Some(("u-1", "access-1")));
        assert_eq!(data.refresh_token.as_deref(), Some(REFRESH_TOKEN));
    }

    #[tokio::test]
    async fn test_refresh_session_replaces_tokens() {
        let (client, _) = backend_stub().await;
        let session = new_session();
        session
            .insert(SESSION_USER_ID_KEY, "u-1".to_string())
            .await
            .unwrap();
        session
            .insert(SESSION_ACCESS_TOKEN_KEY, "expired".to_string())
            .await
            .unwrap();
        session
            .insert(SESSION_REFRESH_TOKEN_KEY, REFRESH_TOKEN.to_string())
            .await
            .unwrap();

        let refreshed = refresh_session(&session, &client).await.unwrap().unwrap();
        assert_eq!(refreshed.access_token, "access-2");

        let data = current_session(&session).await.unwrap();
        assert_eq!(data.credentials(), Some(("u-1", "access-2")));
        assert_eq!(data.refresh_token.as_deref(), Some("refresh-2"));
    }

    #[tokio::test]
    async fn test_refresh_session_without_usable_token() {
        let (client, _) = backend_stub().await;

        let session = new_session();
        assert!(refresh_session(&session, &client).await.unwrap().is_none());

        session
            .insert(SESSION_REFRESH_TOKEN_KEY, "revoked-refresh".to_string())
            .await
            .unwrap();
        assert!(refresh_session(&session, &client).await.unwrap().is_none());
    }
}
