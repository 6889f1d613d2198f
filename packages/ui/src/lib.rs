//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod navbar;
pub use navbar::{Navbar, UserMenu};

mod auth;
pub use auth::{sleep, use_auth, AuthProvider, AuthState, LogoutButton};

mod search_header;
pub use search_header::SearchHeader;

mod sprite;
pub use sprite::Sprite;

mod type_badge;
pub use type_badge::TypeBadge;

mod stat_bar;
pub use stat_bar::StatBar;

mod evolution_strip;
pub use evolution_strip::EvolutionStrip;

mod favorite;
pub use favorite::{prompt_sign_in, use_favorite, FavoriteState};

mod catalog_card;
pub use catalog_card::CatalogCard;

mod request;
pub use request::RequestGeneration;
