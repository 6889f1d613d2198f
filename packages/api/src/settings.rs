//! Process-wide settings: `pokedex.toml` plus environment overrides.
//!
//! The file is looked up at `POKEDEX_CONFIG` or `./pokedex.toml`; a missing file
//! means defaults. `POKEAPI_BASE_URL` overrides the catalog root.

use std::path::PathBuf;
use std::sync::OnceLock;

use store::PokedexConfig;

static SETTINGS: OnceLock<PokedexConfig> = OnceLock::new();

/// Get or load the application settings.
pub fn settings() -> &'static PokedexConfig {
    SETTINGS.get_or_init(load)
}

fn config_path() -> PathBuf {
    std::env::var("POKEDEX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(PokedexConfig::filename()))
}

fn load() -> PokedexConfig {
    dotenvy::dotenv().ok();

    let path = config_path();
    let config = match std::fs::read_to_string(&path) {
        Ok(text) => match PokedexConfig::from_toml(&text) {
            Ok(config) => {
                tracing::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
                PokedexConfig::default()
            }
        },
        Err(_) => PokedexConfig::default(),
    };

    apply_env(config, std::env::var("POKEAPI_BASE_URL").ok())
}

fn apply_env(config: PokedexConfig, base_url: Option<String>) -> PokedexConfig {
    match base_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => config.with_base_url(url.trim()),
        None => config,
    }
}
