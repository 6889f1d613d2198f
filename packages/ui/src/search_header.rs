use dioxus::prelude::*;

use crate::icons::FaMagnifyingGlass;
use crate::Icon;

/// Page title with a search box. Enter or the button submits the current text.
#[component]
pub fn SearchHeader(
    on_search: EventHandler<String>,
    #[props(default = "Search Pokémon by name or number".to_string())] placeholder: String,
) -> Element {
    let mut term = use_signal(String::new);

    rsx! {
        header {
            class: "search-header",
            h1 { class: "page-title", "Pokédex" }
            div {
                class: "search-bar",
                input {
                    r#type: "text",
                    placeholder: "{placeholder}",
                    value: term(),
                    oninput: move |evt: FormEvent| term.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            on_search.call(term());
                        }
                    },
                }
                button {
                    class: "search-button",
                    title: "Search",
                    onclick: move |_| on_search.call(term()),
                    Icon { icon: FaMagnifyingGlass, width: 16, height: 16 }
                }
            }
        }
    }
}
