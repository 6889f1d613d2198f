use dioxus::prelude::*;
use store::format::type_color;

#[component]
pub fn TypeBadge(kind: String) -> Element {
    let color = type_color(&kind);
    rsx! {
        span {
            class: "type-badge",
            style: "background-color: {color};",
            "{kind}"
        }
    }
}
