pub mod config;
pub mod evolution;
pub mod favorites;
pub mod format;
pub mod forms;
pub mod models;
pub mod pokeapi;

mod memory;
pub use memory::MemoryFavorites;

pub use config::PokedexConfig;
pub use evolution::extract_evolution_chain;
pub use favorites::{generation_progress, FavoriteStore, Favorites, StoreError};
pub use forms::{FormError, LoginForm, RegistrationForm};
pub use models::{
    BaseStat, CatalogItem, CatalogPage, EvolutionStage, FavoriteRecord, ItemDetail,
    PokemonProfile, RowId,
};
