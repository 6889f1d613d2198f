//! Local HTTP stubs for the client tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::backend::{BackendClient, BackendConfig};

/// Serve a router on an ephemeral local port and return its base URL.
///
/// `build` receives the base URL so stub payloads can link back to the stub.
pub async fn serve(build: impl FnOnce(&str) -> Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let router = build(&base);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

/// Password accepted by the identity stub.
pub const PASSWORD: &str = "pikachu";
/// An address the stub signs up but refuses to sign in until confirmed.
pub const UNCONFIRMED_EMAIL: &str = "pending@kanto.org";
/// Refresh token the stub accepts once, answering with `access-2` / `refresh-2`.
pub const REFRESH_TOKEN: &str = "refresh-1";
/// Access token the table store treats as expired.
pub const EXPIRED_TOKEN: &str = "expired";

fn user_json(email: &str) -> Value {
    json!({ "id": "u-1", "email": email, "user_metadata": { "name": "Ash" } })
}

fn session_json(access: &str, refresh: &str, email: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_in": 3600,
        "token_type": "bearer",
        "user": user_json(email)
    })
}

fn rejected(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn invalid_grant(description: &str) -> Response {
    rejected(
        StatusCode::BAD_REQUEST,
        json!({ "error": "invalid_grant", "error_description": description }),
    )
}

fn bearer(headers: &HeaderMap) -> &str {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
}

async fn signup(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if email == "ash@kanto.org" && body["password"] == "taken" {
        return rejected(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "code": 422, "msg": "User already registered" }),
        );
    }
    Json(user_json(email)).into_response()
}

async fn token(
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    match query.get("grant_type").map(String::as_str) {
        Some("password") => {
            let email = body["email"].as_str().unwrap_or_default();
            if email == UNCONFIRMED_EMAIL {
                return invalid_grant("Email not confirmed");
            }
            if body["password"] != PASSWORD {
                return invalid_grant("Invalid login credentials");
            }
            Json(session_json("access-1", REFRESH_TOKEN, email)).into_response()
        }
        Some("refresh_token") => {
            if body["refresh_token"] != REFRESH_TOKEN {
                return invalid_grant("Invalid Refresh Token: Refresh Token Not Found");
            }
            Json(session_json("access-2", "refresh-2", "ash@kanto.org")).into_response()
        }
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn user(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        "access-1" | "access-2" => Json(user_json("ash@kanto.org")).into_response(),
        "revoked" => rejected(StatusCode::FORBIDDEN, json!({ "msg": "User not allowed" })),
        _ => rejected(StatusCode::UNAUTHORIZED, json!({ "msg": "invalid JWT" })),
    }
}

/// A Supabase-shaped backend: identity under `/auth/v1`, and `users` / `favorites`
/// tables under `/rest/v1`. Inserted profile rows are pushed to `profiles`.
pub fn backend_router(profiles: Arc<Mutex<Vec<Value>>>) -> Router {
    Router::new()
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/logout", post(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/rest/v1/users",
            post(move |Json(rows): Json<Value>| async move {
                profiles.lock().unwrap().extend(rows.as_array().cloned().unwrap_or_default());
                StatusCode::CREATED
            }),
        )
        .route(
            "/rest/v1/favorites",
            get(|headers: HeaderMap| async move {
                if bearer(&headers) == EXPIRED_TOKEN {
                    return rejected(
                        StatusCode::UNAUTHORIZED,
                        json!({ "code": "PGRST301", "message": "JWT expired" }),
                    );
                }
                Json(json!([
                    { "id": 7, "user_id": "u-1", "pokemon_id": 25, "pokemon_name": "pikachu" }
                ]))
                .into_response()
            }),
        )
}

/// A client pointed at a fresh backend stub, plus the stub's profile rows.
pub async fn backend_stub() -> (BackendClient, Arc<Mutex<Vec<Value>>>) {
    let profiles = Arc::new(Mutex::new(Vec::new()));
    let router = backend_router(profiles.clone());
    let base = serve(move |_| router).await;
    let client = BackendClient::new(BackendConfig::new(base, "anon")).unwrap();
    (client, profiles)
}
