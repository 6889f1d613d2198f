use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::icons::{FaHouse, FaRightToBracket};
use crate::{Icon, UI_CSS};

/// Top navigation bar. Platform packages pass their route links as children.
#[component]
pub fn Navbar(on_home: EventHandler<()>, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: UI_CSS }
        nav {
            class: "navbar",
            button {
                class: "navbar-brand",
                onclick: move |_| on_home.call(()),
                Icon { icon: FaHouse, width: 22, height: 22 }
                span { "Pokédex" }
            }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}

/// Greeting and sign-out when signed in, a sign-in link otherwise.
#[component]
pub fn UserMenu(on_sign_in: EventHandler<()>, on_sign_out: EventHandler<()>) -> Element {
    let auth = use_auth();
    let state = auth();

    if state.loading {
        return rsx! {};
    }

    match state.user {
        Some(user) => rsx! {
            div {
                class: "user-menu",
                span { class: "user-greeting", "Hello, {user.display_name()}" }
                LogoutButton {
                    class: "navbar-link",
                    on_logout: move |_| on_sign_out.call(()),
                }
            }
        },
        None => rsx! {
            button {
                class: "navbar-link",
                onclick: move |_| on_sign_in.call(()),
                Icon { icon: FaRightToBracket, width: 18, height: 18 }
                span { "Sign in" }
            }
        },
    }
}
