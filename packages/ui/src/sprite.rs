use dioxus::prelude::*;
use store::format::FALLBACK_ARTWORK;

/// An image that swaps to a stock artwork when the source is missing or fails to load.
#[component]
pub fn Sprite(
    src: Option<String>,
    alt: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut failed = use_signal(|| false);

    let url = match (&src, failed()) {
        (Some(src), false) => src.clone(),
        _ => FALLBACK_ARTWORK.to_string(),
    };

    rsx! {
        img {
            class: "{class}",
            src: "{url}",
            alt: "{alt}",
            onerror: move |_| failed.set(true),
        }
    }
}
