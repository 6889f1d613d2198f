use dioxus::prelude::*;
use store::format::padded_id;
use store::CatalogItem;

use crate::auth::use_auth;
use crate::favorite::{prompt_sign_in, use_favorite};
use crate::icons::FaHeart;
use crate::{Icon, Sprite, TypeBadge};

/// A catalog entry with its favorite toggle.
#[component]
pub fn CatalogCard(item: CatalogItem, on_open: EventHandler<u32>) -> Element {
    let auth = use_auth();
    let favorite = use_favorite(item.id, item.name.clone());

    let signed_in = auth().user.is_some();
    let is_favorite = (favorite.is_favorite)();
    let pending = (favorite.pending)();
    let id = item.id;

    let on_toggle = move |evt: MouseEvent| {
        evt.stop_propagation();
        if auth.peek().user.is_none() {
            prompt_sign_in("Sign in to add Pokémon to your favorites!");
            return;
        }
        favorite.toggle();
    };

    let heart_class = if is_favorite { "heart heart--on" } else { "heart" };
    let title = if is_favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };

    rsx! {
        div {
            class: "card",
            div {
                class: "card-media",
                onclick: move |_| on_open.call(id),
                Sprite {
                    key: "{id}",
                    src: item.image.clone(),
                    alt: item.name.clone(),
                    class: "card-image",
                }
                button {
                    class: "favorite-toggle",
                    title: "{title}",
                    disabled: pending,
                    onclick: on_toggle,
                    span { class: "{heart_class}", Icon { icon: FaHeart, width: 22, height: 22 } }
                }
            }
            div {
                class: "card-body",
                h3 {
                    class: "card-name",
                    onclick: move |_| on_open.call(id),
                    "{item.name}"
                }
                p { class: "card-id", {padded_id(item.id)} }
                div {
                    class: "card-types",
                    for kind in item.types.iter() {
                        TypeBadge { key: "{kind}", kind: kind.clone() }
                    }
                }
                div {
                    class: "card-status",
                    if !signed_in {
                        p { class: "status-muted", "Sign in to add favorites" }
                    } else if pending {
                        p { class: "status-pending", "Saving..." }
                    } else if is_favorite {
                        p { class: "status-favorite", "⭐ In your favorites!" }
                    }
                }
            }
        }
    }
}
