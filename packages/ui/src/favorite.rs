//! Favorite state for one catalog entry, shared by cards and the detail page.

use dioxus::prelude::*;

use crate::auth::use_auth;

/// Signals behind a favorite toggle.
#[derive(Clone, Copy, PartialEq)]
pub struct FavoriteState {
    pub is_favorite: Signal<bool>,
    /// A toggle request is in flight.
    pub pending: Signal<bool>,
    item: Signal<(u32, String)>,
}

/// Track whether an entry is in the signed-in user's favorites.
///
/// The state is fetched when the entry or the signed-in user changes. Signed-out
/// visitors are never looked up.
pub fn use_favorite(pokemon_id: u32, pokemon_name: String) -> FavoriteState {
    let auth = use_auth();

    // Track the entry in a signal so the lookup re-runs when the route param changes
    let mut item = use_signal(|| (pokemon_id, pokemon_name.clone()));
    if item.peek().0 != pokemon_id {
        item.set((pokemon_id, pokemon_name));
    }

    let mut is_favorite = use_signal(|| false);
    let pending = use_signal(|| false);

    let _ = use_resource(move || async move {
        let (id, name) = item();
        if auth().user.is_none() {
            is_favorite.set(false);
            return;
        }
        match api::is_favorite(id).await {
            Ok(favorite) => is_favorite.set(favorite),
            Err(e) => tracing::error!("Failed to check favorite {}: {}", name, e),
        }
    });

    FavoriteState {
        is_favorite,
        pending,
        item,
    }
}

impl FavoriteState {
    /// Flip the favorite. Failures are logged and leave the state unchanged.
    /// Ignored while a previous toggle is still in flight.
    pub fn toggle(&self) {
        let mut is_favorite = self.is_favorite;
        let mut pending = self.pending;
        if *pending.peek() {
            return;
        }
        let (id, name) = self.item.peek().clone();

        pending.set(true);
        spawn(async move {
            match api::toggle_favorite(id, name.clone()).await {
                Ok(now_favorite) => is_favorite.set(now_favorite),
                Err(e) => tracing::error!("Failed to update favorite {}: {}", name, e),
            }
            pending.set(false);
        });
    }
}

/// Tell a signed-out visitor that the action needs an account.
pub fn prompt_sign_in(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("{}", message);
}
