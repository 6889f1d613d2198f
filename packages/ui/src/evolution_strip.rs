use dioxus::prelude::*;
use store::format::padded_id;
use store::EvolutionStage;

use crate::Sprite;

/// Evolution stages in order, separated by arrows. Clicking a stage selects its id.
#[component]
pub fn EvolutionStrip(stages: Vec<EvolutionStage>, on_select: EventHandler<u32>) -> Element {
    let last = stages.len().saturating_sub(1);

    rsx! {
        div {
            class: "evolution-chain",
            for (index, stage) in stages.into_iter().enumerate() {
                button {
                    key: "{stage.id}",
                    class: "evolution-item",
                    onclick: move |_| on_select.call(stage.id),
                    Sprite {
                        key: "{stage.image}",
                        src: Some(stage.image.clone()),
                        alt: stage.name.clone(),
                        class: "evolution-image",
                    }
                    div { class: "evolution-name", "{stage.name}" }
                    div { class: "evolution-id", {padded_id(stage.id)} }
                }
                if index < last {
                    span { class: "arrow", "→" }
                }
            }
        }
    }
}
