//! Catalog grid with search and incremental paging.

use dioxus::prelude::*;
use store::CatalogItem;
use ui::{CatalogCard, RequestGeneration, SearchHeader};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();
    let mut items = use_signal(Vec::<CatalogItem>::new);
    let mut next_offset = use_signal(|| 0u32);
    let mut has_more = use_signal(|| false);
    let mut loading = use_signal(|| true);
    // A search result replaces the grid; paging resumes after a blank search
    let mut searching = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    // Pages and searches share `items`; only the latest request may write it
    let mut requests = use_signal(RequestGeneration::default);

    let mut load_page = move |offset: u32| {
        let ticket = requests.write().next();
        spawn(async move {
            loading.set(true);
            error.set(None);
            let result = api::list_catalog(offset).await;
            if !requests.peek().is_current(ticket) {
                return;
            }
            match result {
                Ok(page) => {
                    if offset == 0 {
                        items.set(page.items);
                    } else {
                        items.write().extend(page.items);
                    }
                    next_offset.set(page.next_offset);
                    has_more.set(page.has_more);
                }
                Err(e) => {
                    tracing::error!("Failed to load catalog page at {}: {}", offset, e);
                    error.set(Some("Could not load Pokémon. Please try again.".to_string()));
                }
            }
            loading.set(false);
        });
    };

    use_hook(|| load_page(0));

    let on_search = move |term: String| {
        if term.trim().is_empty() {
            searching.set(false);
            load_page(0);
            return;
        }

        searching.set(true);
        let ticket = requests.write().next();
        spawn(async move {
            loading.set(true);
            error.set(None);
            items.set(Vec::new());
            let result = api::search_catalog(term.clone()).await;
            if !requests.peek().is_current(ticket) {
                return;
            }
            match result {
                Ok(found) => items.set(found.into_iter().collect()),
                Err(e) => {
                    tracing::error!("Search for {:?} failed: {}", term, e);
                    error.set(Some("Search failed. Please try again.".to_string()));
                }
            }
            loading.set(false);
        });
    };

    let is_empty = items.read().is_empty();

    rsx! {
        SearchHeader { on_search }

        if let Some(err) = error() {
            div { class: "banner banner-error", "{err}" }
        }

        if is_empty && loading() {
            p { class: "placeholder", "Loading…" }
        } else if is_empty {
            p { class: "placeholder", "No Pokémon found." }
        } else {
            div {
                class: "grid",
                for item in items() {
                    CatalogCard {
                        key: "{item.id}",
                        item: item.clone(),
                        on_open: move |id: u32| {
                            nav.push(Route::PokemonDetail { id: id.to_string() });
                        },
                    }
                }
            }
        }

        if has_more() && !searching() && !is_empty {
            div {
                class: "load-more",
                button {
                    class: "button button-primary",
                    disabled: loading(),
                    onclick: move |_| {
                        load_page(next_offset());
                    },
                    if loading() { "Loading…" } else { "Load more" }
                }
            }
        }
    }
}

/// `/pokemons` renders the same catalog as `/`.
#[component]
pub fn Pokemons() -> Element {
    rsx! {
        Home {}
    }
}
