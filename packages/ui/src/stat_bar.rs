use dioxus::prelude::*;
use store::format::{stat_bar_percent, stat_label};
use store::BaseStat;

/// One base stat: label, value and a bar filled up to 100.
#[component]
pub fn StatBar(stat: BaseStat) -> Element {
    let label = stat_label(&stat.name);
    let width = stat_bar_percent(stat.base_stat);

    rsx! {
        div {
            class: "stat-item",
            div {
                class: "stat-row",
                span { class: "stat-label", "{label}" }
                span { class: "stat-value", "{stat.base_stat}" }
            }
            div {
                class: "stat-bar",
                div { class: "stat-fill", style: "width: {width}%;" }
            }
        }
    }
}
