use dioxus::prelude::*;
use store::format::{favorites_count_label, padded_id};
use ui::icons::FaTrash;
use ui::{use_auth, Icon, Sprite, TypeBadge};

use crate::Route;

/// The signed-in user's favorites with removal and collection stats.
#[component]
pub fn Favorites() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let mut resource = use_resource(move || async move {
        // Re-run when the user signs in or out
        if auth().user.is_none() {
            return Ok(api::FavoritesOverview::default());
        }
        let result = api::list_favorites().await;
        if let Err(e) = &result {
            tracing::error!("Failed to load favorites: {}", e);
        }
        result
    });

    let remove = move |pokemon_id: u32| {
        spawn(async move {
            match api::remove_favorite(pokemon_id).await {
                Ok(()) => resource.restart(),
                Err(e) => tracing::error!("Failed to remove favorite {}: {}", pokemon_id, e),
            }
        });
    };

    let state = auth();
    if state.loading {
        return rsx! {
            p { class: "placeholder", "Loading…" }
        };
    }
    if state.user.is_none() {
        return rsx! {
            div {
                class: "notice",
                h2 { "Sign in to see your favorites" }
                p { class: "status-muted", "Save Pokémon while browsing and find them here." }
                Link { class: "button button-primary", to: Route::Login {}, "Sign in" }
            }
        };
    }

    let data = resource.read().as_ref().map(|result| {
        result
            .as_ref()
            .map(|overview| overview.clone())
            .map_err(|e| e.to_string())
    });

    let overview = match data {
        None => {
            return rsx! {
                p { class: "placeholder", "Loading…" }
            }
        }
        Some(Err(e)) => {
            return rsx! {
                div { class: "banner banner-error", "Could not load favorites: {e}" }
            }
        }
        Some(Ok(overview)) => overview,
    };

    if overview.favorites.is_empty() {
        return rsx! {
            div {
                class: "notice",
                h2 { "No favorites yet" }
                p { class: "status-muted", "Tap the heart on any Pokémon to add it here." }
                Link { class: "button button-primary", to: Route::Home {}, "Browse Pokémon" }
            }
        };
    }

    let count = overview.items.len();

    rsx! {
        header {
            class: "search-header",
            h1 { class: "page-title", "My Favorites" }
            p { class: "status-muted", "{favorites_count_label(count)}" }
        }

        div {
            class: "grid",
            for item in overview.items.clone() {
                div {
                    key: "{item.id}",
                    class: "card",
                    div {
                        class: "card-media",
                        onclick: move |_| {
                            nav.push(Route::PokemonDetail { id: item.id.to_string() });
                        },
                        Sprite {
                            src: item.image.clone(),
                            alt: item.name.clone(),
                            class: "card-image",
                        }
                        button {
                            class: "favorite-toggle",
                            title: "Remove from favorites",
                            onclick: move |evt: MouseEvent| {
                                evt.stop_propagation();
                                remove(item.id);
                            },
                            Icon { icon: FaTrash, width: 18, height: 18 }
                        }
                    }
                    div {
                        class: "card-body",
                        h3 { class: "card-name", "{item.name}" }
                        p { class: "card-id", "{padded_id(item.id)}" }
                        div {
                            class: "card-types",
                            for kind in item.types.clone() {
                                TypeBadge { key: "{kind}", kind }
                            }
                        }
                    }
                }
            }
        }

        section {
            class: "stats-panel",
            div {
                class: "stats-item",
                span { class: "stats-value", "{count}" }
                span { class: "stats-label", "Total favorites" }
            }
            div {
                class: "stats-item",
                span { class: "stats-value", "{overview.generation_progress}%" }
                span { class: "stats-label", "Of generation one" }
            }
        }
    }
}
