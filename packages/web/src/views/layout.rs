use dioxus::prelude::*;
use ui::icons::FaHeart;
use ui::{Icon, Navbar, UserMenu};

use crate::Route;

/// Navbar above every page.
#[component]
pub fn AppLayout() -> Element {
    let nav = use_navigator();

    rsx! {
        Navbar {
            on_home: move |_| {
                nav.push(Route::Home {});
            },
            Link { class: "navbar-link", to: Route::Home {}, "Pokédex" }
            Link { class: "navbar-link", to: Route::Pokemons {}, "Pokémon" }
            Link {
                class: "navbar-link",
                to: Route::Favorites {},
                Icon { icon: FaHeart, width: 16, height: 16 }
                span { "Favorites" }
            }
            UserMenu {
                on_sign_in: move |_| {
                    nav.push(Route::Login {});
                },
                on_sign_out: move |_| {
                    nav.push(Route::Home {});
                },
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
