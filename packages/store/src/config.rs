//! # Application configuration — `pokedex.toml`
//!
//! Defines the optional TOML file read by the server at startup
//! (filename: [`PokedexConfig::filename`] = `"pokedex.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [catalog]
//! base_url = "https://pokeapi.co/api/v2"   # catalog REST API root
//! page_size = 20                           # cards per "load more"
//!
//! [favorites]
//! generation_size = 151   # denominator of the generation-progress stat
//! ```
//!
//! All structs derive `Default` so that a missing or empty config file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `pokedex.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PokedexConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

/// Catalog API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_page_size() -> u32 {
    20
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

/// Favorites page settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Number of entries in the first generation.
    #[serde(default = "default_generation_size")]
    pub generation_size: u32,
}

fn default_generation_size() -> u32 {
    151
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            generation_size: default_generation_size(),
        }
    }
}

impl PokedexConfig {
    /// Builder method to point the catalog at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.catalog.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "pokedex.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
