//! Identity-service calls (`/auth/v1`).
//!
//! ## Flow
//!
//! 1. **[`sign_up`](BackendClient::sign_up)** — `POST /signup` with the display name
//!    as user metadata. Depending on the project's e-mail confirmation setting the
//!    service answers with a session or with the bare user.
//! 2. **[`sign_in_with_password`](BackendClient::sign_in_with_password)** —
//!    `POST /token?grant_type=password`, returning an access token and the user.
//! 3. **[`get_user`](BackendClient::get_user)** — `GET /user` with the access token;
//!    an expired or revoked token yields `None`.
//! 4. **[`refresh_session`](BackendClient::refresh_session)** —
//!    `POST /token?grant_type=refresh_token`, trading the long-lived refresh token
//!    for a new access token once the old one expires.
//! 5. **[`sign_out`](BackendClient::sign_out)** — `POST /logout`, revoking the token.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::OnceCell;

use super::config::BackendConfig;
use super::table::TableQuery;
use super::USERS_TABLE;
use crate::error::{ApiError, ApiResult};
use crate::models::UserInfo;

static CLIENT: OnceCell<BackendClient> = OnceCell::const_new();

/// Get or initialize the shared backend client.
pub async fn backend_client() -> ApiResult<&'static BackendClient> {
    CLIENT
        .get_or_try_init(|| async { BackendClient::new(BackendConfig::from_env()?) })
        .await
}

/// A user as returned by the identity service.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

impl BackendUser {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone().unwrap_or_default(),
            name: self.user_metadata.name.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}

/// A signed-in session.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: BackendUser,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(BackendSession),
    User(BackendUser),
}

#[derive(Serialize)]
struct ProfileRow<'a> {
    id: &'a str,
    email: &'a str,
    name: &'a str,
}

/// Client for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    pub(super) http: reqwest::Client,
    pub(super) config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    /// Attach the project key and a bearer token (user token, or the anonymous key).
    pub(super) fn authorize(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(&self.config.anon_key);
        request
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Pass through successful responses, turn failures into [`ApiError`].
    pub(super) async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            url,
            message: error_message(&body),
        })
    }

    /// Like [`check`](Self::check), but 4xx answers become [`ApiError::Auth`] with the
    /// provider's own message.
    async fn check_auth(response: Response) -> ApiResult<Response> {
        match Self::check(response).await {
            Err(ApiError::Status {
                status, message, ..
            }) if (400..500).contains(&status) && status != 401 && status != 403 => {
                Err(ApiError::Auth { message })
            }
            other => other,
        }
    }

    /// Register a new account. Returns the created user when the service reports one.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ApiResult<Option<BackendUser>> {
        let body = json!({
            "email": email,
            "password": password,
            "data": { "name": name },
        });
        let response = self
            .authorize(self.http.post(self.config.auth_url("signup")), None)
            .json(&body)
            .send()
            .await?;
        let response = Self::check_auth(response).await?;

        let text = response.text().await?;
        let parsed: Option<SignUpResponse> = serde_json::from_str(&text).ok();
        Ok(match parsed {
            Some(SignUpResponse::Session(session)) => Some(session.user),
            Some(SignUpResponse::User(user)) => Some(user),
            None => None,
        })
    }

    /// Exchange email and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ApiResult<BackendSession> {
        self.token_grant("password", json!({ "email": email, "password": password }))
            .await
    }

    /// Trade a refresh token for a fresh session. A refused token comes back as
    /// [`ApiError::Auth`].
    pub async fn refresh_session(&self, refresh_token: &str) -> ApiResult<BackendSession> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    /// `POST /token?grant_type=...`; credential rejections become [`ApiError::Auth`].
    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> ApiResult<BackendSession> {
        let url = self
            .config
            .auth_url(&format!("token?grant_type={grant_type}"));
        let response = self
            .authorize(self.http.post(url), None)
            .json(&body)
            .send()
            .await?;
        let response = match Self::check(response).await {
            Err(ApiError::Status {
                status: 400 | 401 | 422,
                message,
                ..
            }) => return Err(ApiError::Auth { message }),
            other => other?,
        };
        Ok(response.json().await?)
    }

    /// Create an account, sign it in and insert its profile row.
    ///
    /// Returns `None` when the account exists but the service refuses the first
    /// sign-in, which is what a project requiring email confirmation does. A failed
    /// profile insert is logged and does not fail the registration.
    pub async fn sign_up_and_sign_in(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ApiResult<Option<BackendSession>> {
        let created = self.sign_up(email, password, name).await?;

        match self.sign_in_with_password(email, password).await {
            Ok(signed_in) => {
                if let Err(e) = self
                    .insert_profile(Some(&signed_in.access_token), &signed_in.user, name)
                    .await
                {
                    tracing::warn!("Failed to insert profile row for {}: {}", signed_in.user.id, e);
                }
                Ok(Some(signed_in))
            }
            Err(ApiError::Auth { message }) => {
                tracing::info!("Account created, sign-in deferred: {}", message);
                if let Some(user) = created {
                    if let Err(e) = self.insert_profile(None, &user, name).await {
                        tracing::warn!("Failed to insert profile row for {}: {}", user.id, e);
                    }
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> ApiResult<()> {
        let response = self
            .authorize(self.http.post(self.config.auth_url("logout")), Some(access_token))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// The user behind an access token, or `None` when the token is no longer valid.
    pub async fn get_user(&self, access_token: &str) -> ApiResult<Option<BackendUser>> {
        let response = self
            .authorize(self.http.get(self.config.auth_url("user")), Some(access_token))
            .send()
            .await?;
        match Self::check(response).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Start a query against a table, authorized as the given user.
    pub fn from_table(&self, table: &str, access_token: Option<&str>) -> TableQuery<'_> {
        TableQuery::new(self, table, access_token)
    }

    /// Insert the profile row that accompanies a new account.
    pub async fn insert_profile(
        &self,
        access_token: Option<&str>,
        user: &BackendUser,
        name: &str,
    ) -> ApiResult<()> {
        let email = user.email.as_deref().unwrap_or_default();
        self.from_table(USERS_TABLE, access_token)
            .insert(&[ProfileRow {
                id: &user.id,
                email,
                name,
            }])
            .await
    }
}

/// Reduce an error body to the provider's message.
///
/// The identity service and the table store use different field names, so the
/// first one present wins; anything unparsable is returned as-is.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{backend_stub, PASSWORD, REFRESH_TOKEN, UNCONFIRMED_EMAIL};

    #[test]
    fn test_error_message_fields() {
        assert_eq!(
            error_message(r#"{"code":400,"msg":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            error_message(r#"{"code":"42501","message":"permission denied for table favorites"}"#),
            "permission denied for table favorites"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"code":500}"#), r#"{"code":500}"#);
    }

    #[test]
    fn test_sign_up_response_shapes() {
        let session = r#"{
            "access_token": "jwt",
            "refresh_token": "r",
            "expires_in": 3600,
            "user": { "id": "u-1", "email": "ash@kanto.org", "user_metadata": { "name": "Ash" } }
        }"#;
        match serde_json::from_str::<SignUpResponse>(session).unwrap() {
            SignUpResponse::Session(s) => assert_eq!(s.user.id, "u-1"),
            SignUpResponse::User(_) => panic!("expected session"),
        }

        let user = r#"{ "id": "u-2", "email": "misty@cerulean.gym", "user_metadata": {} }"#;
        match serde_json::from_str::<SignUpResponse>(user).unwrap() {
            SignUpResponse::User(u) => assert_eq!(u.id, "u-2"),
            SignUpResponse::Session(_) => panic!("expected user"),
        }
    }

    #[test]
    fn test_user_to_info() {
        let user: BackendUser = serde_json::from_str(
            r#"{ "id": "u-1", "email": "ash@kanto.org", "user_metadata": { "name": "Ash" } }"#,
        )
        .unwrap();
        let info = user.to_info();
        assert_eq!(info.id, "u-1");
        assert_eq!(info.email, "ash@kanto.org");
        assert_eq!(info.display_name(), "Ash");

        let nameless: BackendUser =
            serde_json::from_str(r#"{ "id": "u-3", "email": "brock@pewter.gym" }"#).unwrap();
        assert_eq!(nameless.to_info().display_name(), "brock");
    }


    #[tokio::test]
    async fn test_sign_in_with_password() {
        let (client, _) = backend_stub().await;

        let session = client
            .sign_in_with_password("ash@kanto.org", PASSWORD)
            .await
            .unwrap();
        assert_eq!(session.access_token, "access-1");
        assert_eq!(session.refresh_token.as_deref(), Some(REFRESH_TOKEN));
        assert_eq!(session.user.id, "u-1");

        match client.sign_in_with_password("ash@kanto.org", "wrong").await {
            Err(ApiError::Auth { message }) => assert_eq!(message, "Invalid login credentials"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_session() {
        let (client, _) = backend_stub().await;

        let session = client.refresh_session(REFRESH_TOKEN).await.unwrap();
        assert_eq!(session.access_token, "access-2");
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-2"));

        let err = client.refresh_session("stale").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth { .. }));
    }

    #[tokio::test]
    async fn test_get_user_maps_rejected_tokens_to_none() {
        let (client, _) = backend_stub().await;

        let user = client.get_user("access-1").await.unwrap().unwrap();
        assert_eq!(user.to_info().display_name(), "Ash");

        assert!(client.get_user("expired").await.unwrap().is_none());
        assert!(client.get_user("revoked").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_and_sign_in() {
        let (client, profiles) = backend_stub().await;

        let session = client
            .sign_up_and_sign_in("ash@kanto.org", PASSWORD, "Ash")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.access_token, "access-1");

        let rows = profiles.lock().unwrap().clone();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Ash");
        assert_eq!(rows[0]["email"], "ash@kanto.org");
    }

    #[tokio::test]
    async fn test_sign_up_pending_confirmation() {
        let (client, profiles) = backend_stub().await;

        let session = client
            .sign_up_and_sign_in(UNCONFIRMED_EMAIL, PASSWORD, "Misty")
            .await
            .unwrap();
        assert!(session.is_none());
        assert_eq!(profiles.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let (client, _) = backend_stub().await;

        match client.sign_up_and_sign_in("ash@kanto.org", "taken", "Ash").await {
            Err(ApiError::Auth { message }) => assert_eq!(message, "User already registered"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }
}
