//! # API crate — shared fullstack server functions for the Pokédex
//!
//! This crate defines every Dioxus server function the web frontend calls, along
//! with the server-side clients they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Session keys and helpers for the identity service's access token |
//! | [`backend`] | `server` | Hosted backend client: identity (`/auth/v1`) and table store (`/rest/v1`) |
//! | [`catalog`] | `server` | PokéAPI client with concurrent detail fan-out |
//! | [`error`] | `server` | [`error::ApiError`], mapped to `ServerFnError` at the boundary |
//! | [`models`] | — | Client-safe user projection ([`UserInfo`]) |
//! | [`settings`] | `server` | `pokedex.toml` + environment overrides |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `register`, `login_password`, `logout`
//! - **Catalog**: `list_catalog`, `search_catalog`, `get_pokemon`
//! - **Favorites**: `is_favorite`, `toggle_favorite`, `list_favorites`, `remove_favorite`

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

pub mod auth;
#[cfg(feature = "server")]
pub mod backend;
#[cfg(feature = "server")]
pub mod catalog;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;
#[cfg(all(test, feature = "server"))]
mod testing;

pub use models::UserInfo;
pub use store::{
    CatalogItem, CatalogPage, EvolutionStage, FavoriteRecord, ItemDetail, PokemonProfile,
};

/// Everything the favorites page renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FavoritesOverview {
    /// Favorite rows ordered by item id.
    pub favorites: Vec<FavoriteRecord>,
    /// Cards for the favorites that could be loaded from the catalog.
    pub items: Vec<CatalogItem>,
    /// Rounded share of the first generation covered by `items`.
    pub generation_progress: u32,
}

/// Helper: the signed-in user's id plus a favorites service authorized as them.
#[cfg(feature = "server")]
async fn signed_in_favorites(
    session: &tower_sessions::Session,
    client: &backend::BackendClient,
) -> Result<(String, store::Favorites<backend::RestFavorites>), ServerFnError> {
    let data = auth::current_session(session)
        .await
        .map_err(ServerFnError::new)?;

    let Some((user_id, token)) = data.credentials() else {
        return Err(ServerFnError::new(error::ApiError::NotAuthenticated.to_string()));
    };

    Ok((
        user_id.to_string(),
        store::Favorites::new(backend::RestFavorites::new(client.clone(), token)),
    ))
}

/// Helper: run a favorites operation as the signed-in user.
///
/// When the table store rejects the access token, the session is refreshed and
/// the operation runs once more. A refused refresh ends the session.
#[cfg(feature = "server")]
async fn with_favorites<T, F, Fut>(
    session: &tower_sessions::Session,
    client: &backend::BackendClient,
    op: F,
) -> Result<T, ServerFnError>
where
    F: Fn(String, store::Favorites<backend::RestFavorites>) -> Fut,
    Fut: std::future::Future<Output = Result<T, store::StoreError>>,
{
    let (user_id, favorites) = signed_in_favorites(session, client).await?;
    match op(user_id, favorites).await {
        Err(store::StoreError::NotAuthenticated) => {}
        other => return other.map_err(|e| ServerFnError::new(e.to_string())),
    }

    let refreshed = auth::refresh_session(session, client)
        .await
        .map_err(ServerFnError::new)?;
    if refreshed.is_none() {
        auth::clear_session(session)
            .await
            .map_err(ServerFnError::new)?;
        return Err(ServerFnError::new(error::ApiError::NotAuthenticated.to_string()));
    }

    let (user_id, favorites) = signed_in_favorites(session, client).await?;
    op(user_id, favorites)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Helper: the user behind the session's access token, refreshing it once if it
/// has expired. Clears the session when neither token is accepted.
#[cfg(feature = "server")]
async fn session_user(
    session: &tower_sessions::Session,
    client: &backend::BackendClient,
) -> Result<Option<UserInfo>, ServerFnError> {
    let data = auth::current_session(session)
        .await
        .map_err(ServerFnError::new)?;

    let Some((_, token)) = data.credentials() else {
        return Ok(None);
    };

    let user = client
        .get_user(token)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if let Some(user) = user {
        return Ok(Some(user.to_info()));
    }

    let refreshed = auth::refresh_session(session, client)
        .await
        .map_err(ServerFnError::new)?;
    match refreshed {
        Some(refreshed) => Ok(Some(refreshed.user.to_info())),
        None => {
            // Token expired or was revoked elsewhere.
            auth::clear_session(session)
                .await
                .map_err(ServerFnError::new)?;
            Ok(None)
        }
    }
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let client = backend::backend_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    session_user(&session, client).await
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Register a new account, then sign it in.
///
/// Returns `None` when the account was created but the identity service wants the
/// email confirmed before the first sign-in.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<Option<UserInfo>, ServerFnError> {
    use crate::error::ApiError;

    let form = store::RegistrationForm {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password,
        confirm_password,
    };
    form.validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let client = backend::backend_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let signed_in = client
        .sign_up_and_sign_in(&form.email, &form.password, &form.name)
        .await
        .map_err(|e| match e {
            ApiError::Auth { message } => {
                ServerFnError::new(store::forms::registration_error_message(&message))
            }
            other => {
                tracing::error!("Registration failed: {}", other);
                ServerFnError::new(other.to_string())
            }
        })?;

    let Some(signed_in) = signed_in else {
        return Ok(None);
    };
    auth::store_session(&session, &signed_in)
        .await
        .map_err(ServerFnError::new)?;
    Ok(Some(signed_in.user.to_info()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<Option<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::error::ApiError;

    let form = store::LoginForm::new(email.trim(), password);
    form.validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let client = backend::backend_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let signed_in = client
        .sign_in_with_password(&form.email, &form.password)
        .await
        .map_err(|e| match e {
            ApiError::Auth { message } => {
                ServerFnError::new(store::forms::login_error_message(&message))
            }
            other => {
                tracing::error!("Sign-in failed: {}", other);
                ServerFnError::new(other.to_string())
            }
        })?;

    auth::store_session(&session, &signed_in)
        .await
        .map_err(ServerFnError::new)?;

    Ok(signed_in.user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user: revoke the token, then clear the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    let data = auth::current_session(&session)
        .await
        .map_err(ServerFnError::new)?;

    if let Some(token) = data.access_token.as_deref() {
        match backend::backend_client().await {
            Ok(client) => {
                if let Err(e) = client.sign_out(token).await {
                    tracing::warn!("Identity sign-out failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("Identity sign-out skipped: {}", e),
        }
    }

    auth::clear_session(&session)
        .await
        .map_err(ServerFnError::new)?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// One page of catalog cards starting at `offset`.
#[cfg(feature = "server")]
#[post("/api/catalog/page")]
pub async fn list_catalog(offset: u32) -> Result<CatalogPage, ServerFnError> {
    let client = catalog::catalog_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    client.page(offset).await.map_err(|e| {
        tracing::error!("Failed to load catalog page at {}: {}", offset, e);
        ServerFnError::new(e.to_string())
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/catalog/page")]
pub async fn list_catalog(offset: u32) -> Result<CatalogPage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Exact lookup by name or id.
#[cfg(feature = "server")]
#[post("/api/catalog/search")]
pub async fn search_catalog(term: String) -> Result<Option<CatalogItem>, ServerFnError> {
    let client = catalog::catalog_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    client.lookup(&term).await.map_err(|e| {
        tracing::error!("Search for {:?} failed: {}", term, e);
        ServerFnError::new(e.to_string())
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/catalog/search")]
pub async fn search_catalog(term: String) -> Result<Option<CatalogItem>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Detail page payload for a name or id.
#[cfg(feature = "server")]
#[get("/api/catalog/pokemon/:key")]
pub async fn get_pokemon(key: String) -> Result<PokemonProfile, ServerFnError> {
    let client = catalog::catalog_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let profile = client.profile(&key).await.map_err(|e| {
        tracing::error!("Failed to load Pokémon {}: {}", key, e);
        ServerFnError::new(e.to_string())
    })?;

    profile.ok_or_else(|| ServerFnError::new("Pokémon not found"))
}

#[cfg(not(feature = "server"))]
#[get("/api/catalog/pokemon/:key")]
pub async fn get_pokemon(key: String) -> Result<PokemonProfile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Whether an entry is in the signed-in user's favorites. Always `false` when signed out.
#[cfg(feature = "server")]
#[post("/api/favorites/contains", session: tower_sessions::Session)]
pub async fn is_favorite(pokemon_id: u32) -> Result<bool, ServerFnError> {
    let data = auth::current_session(&session)
        .await
        .map_err(ServerFnError::new)?;
    if data.credentials().is_none() {
        return Ok(false);
    }

    let client = backend::backend_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    with_favorites(&session, client, |user_id, favorites| async move {
        favorites.is_favorite(&user_id, pokemon_id).await
    })
    .await
}

#[cfg(not(feature = "server"))]
#[post("/api/favorites/contains")]
pub async fn is_favorite(pokemon_id: u32) -> Result<bool, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Flip an entry's favorite state. Returns `true` when it is now a favorite.
#[cfg(feature = "server")]
#[post("/api/favorites/toggle", session: tower_sessions::Session)]
pub async fn toggle_favorite(
    pokemon_id: u32,
    pokemon_name: String,
) -> Result<bool, ServerFnError> {
    let client = backend::backend_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let name = pokemon_name.as_str();
    let now_favorite = with_favorites(&session, client, |user_id, favorites| async move {
        favorites.toggle(&user_id, pokemon_id, name).await
    })
    .await
    .map_err(|e| {
        tracing::error!("Failed to update favorite {}: {}", pokemon_id, e);
        e
    })?;

    tracing::info!(
        "{} {} favorites",
        pokemon_name,
        if now_favorite { "added to" } else { "removed from" },
    );
    Ok(now_favorite)
}

#[cfg(not(feature = "server"))]
#[post("/api/favorites/toggle")]
pub async fn toggle_favorite(
    pokemon_id: u32,
    pokemon_name: String,
) -> Result<bool, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The signed-in user's favorites with their catalog cards.
#[cfg(feature = "server")]
#[get("/api/favorites", session: tower_sessions::Session)]
pub async fn list_favorites() -> Result<FavoritesOverview, ServerFnError> {
    let client = backend::backend_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows = with_favorites(&session, client, |user_id, favorites| async move {
        favorites.list(&user_id).await
    })
    .await
    .map_err(|e| {
        tracing::error!("Failed to load favorites: {}", e);
        e
    })?;

    let catalog = catalog::catalog_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let ids: Vec<u32> = rows.iter().map(|r| r.pokemon_id).collect();
    let items = catalog.items_for(&ids).await;

    let generation_size = settings::settings().favorites.generation_size;
    Ok(FavoritesOverview {
        generation_progress: store::generation_progress(items.len(), generation_size),
        favorites: rows,
        items,
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/favorites")]
pub async fn list_favorites() -> Result<FavoritesOverview, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Remove an entry from the signed-in user's favorites.
#[cfg(feature = "server")]
#[post("/api/favorites/remove", session: tower_sessions::Session)]
pub async fn remove_favorite(pokemon_id: u32) -> Result<(), ServerFnError> {
    let client = backend::backend_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    with_favorites(&session, client, |user_id, favorites| async move {
        favorites.remove(&user_id, pokemon_id).await
    })
    .await
    .map_err(|e| {
        tracing::error!("Failed to remove favorite {}: {}", pokemon_id, e);
        e
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/favorites/remove")]
pub async fn remove_favorite(pokemon_id: u32) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
