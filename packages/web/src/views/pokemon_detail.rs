use dioxus::prelude::*;
use store::format::{ability_label, format_height, format_weight, padded_id};
use store::PokemonProfile;
use ui::icons::{FaArrowLeft, FaHeart};
use ui::{use_auth, use_favorite, EvolutionStrip, Icon, Sprite, StatBar, TypeBadge};

use crate::Route;

#[component]
pub fn PokemonDetail(id: String) -> Element {
    // Track the id in a signal so use_resource re-runs on route param change
    let mut key = use_signal(|| id.clone());
    if *key.peek() != id {
        key.set(id.clone());
    }

    let profile = use_resource(move || async move {
        let key = key();
        let result = api::get_pokemon(key.clone()).await;
        if let Err(e) = &result {
            tracing::error!("Failed to load Pokémon {}: {}", key, e);
        }
        result
    });

    let state = profile.read().as_ref().map(|result| {
        result
            .as_ref()
            .map(|profile| profile.clone())
            .map_err(|e| e.to_string())
    });

    match state {
        None => rsx! {
            p { class: "placeholder", "Loading…" }
        },
        Some(Err(e)) => rsx! {
            div {
                class: "detail-error",
                h2 { "Pokémon not found" }
                p { class: "status-muted", "{e}" }
                Link {
                    class: "button button-primary",
                    to: Route::Home {},
                    "Back to Pokédex"
                }
            }
        },
        Some(Ok(profile)) => rsx! {
            ProfileView { profile }
        },
    }
}

#[component]
fn ProfileView(profile: PokemonProfile) -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let detail = profile.detail.clone();
    let favorite = use_favorite(detail.id, detail.name.clone());

    let is_favorite = (favorite.is_favorite)();
    let pending = (favorite.pending)();

    let on_favorite = move |_| {
        if auth.peek().user.is_none() {
            nav.push(Route::Login {});
            return;
        }
        favorite.toggle();
    };

    let favorite_class = if is_favorite {
        "button favorite-button favorite-button--on"
    } else {
        "button favorite-button"
    };

    rsx! {
        div {
            class: "detail",
            button {
                class: "back-link",
                onclick: move |_| nav.go_back(),
                Icon { icon: FaArrowLeft, width: 14, height: 14 }
                span { "Back" }
            }

            div {
                class: "detail-card",
                div {
                    class: "detail-hero",
                    Sprite {
                        key: "{detail.id}",
                        src: detail.image.clone(),
                        alt: detail.name.clone(),
                        class: "detail-image",
                    }
                }

                div {
                    class: "detail-info",
                    h1 { class: "detail-name", "{detail.name}" }
                    p { class: "card-id", "{padded_id(detail.id)}" }
                    div {
                        class: "card-types",
                        for kind in detail.types.clone() {
                            TypeBadge { key: "{kind}", kind }
                        }
                    }

                    button {
                        class: "{favorite_class}",
                        disabled: pending,
                        onclick: on_favorite,
                        Icon { icon: FaHeart, width: 16, height: 16 }
                        span {
                            if is_favorite { "Remove from favorites" } else { "Add to favorites" }
                        }
                    }

                    div {
                        class: "detail-measures",
                        div {
                            span { class: "measure-label", "Height" }
                            span { class: "measure-value", "{format_height(detail.height)}" }
                        }
                        div {
                            span { class: "measure-label", "Weight" }
                            span { class: "measure-value", "{format_weight(detail.weight)}" }
                        }
                    }

                    section {
                        class: "detail-section",
                        h2 { "Abilities" }
                        ul {
                            class: "ability-list",
                            for ability in detail.abilities.clone() {
                                li {
                                    key: "{ability}",
                                    class: "ability",
                                    "{ability_label(&ability)}"
                                }
                            }
                        }
                    }

                    section {
                        class: "detail-section",
                        h2 { "Base stats" }
                        for stat in detail.stats.clone() {
                            StatBar { key: "{stat.name}", stat }
                        }
                    }
                }
            }

            if profile.evolutions.len() > 1 {
                section {
                    class: "detail-section detail-card",
                    h2 { "Evolution chain" }
                    EvolutionStrip {
                        stages: profile.evolutions.clone(),
                        on_select: move |id: u32| {
                            nav.push(Route::PokemonDetail { id: id.to_string() });
                        },
                    }
                }
            }
        }
    }
}
