//! # Domain models for catalog entries and favorites
//!
//! Defines the display shapes the UI renders and the favorite rows kept in the
//! hosted table store. These types are `Serialize + Deserialize` so they can cross
//! the server/client boundary via Dioxus server functions.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`CatalogItem`] | A card in the catalog grid: id, name, sprite URL and type names. |
//! | [`CatalogPage`] | One page of cards plus the offset the next "load more" should request. |
//! | [`ItemDetail`] | Everything the detail page shows: abilities, base stats, height and weight. |
//! | [`EvolutionStage`] | One species in a flattened evolution chain. |
//! | [`PokemonProfile`] | A detail together with its evolution chain. |
//! | [`FavoriteRecord`] | A row of the `favorites` table linking a user to a catalog item. |
//! | [`RowId`] | A table-store primary key, numeric or textual. |
//!
//! Catalog data is never persisted locally. It is fetched from the catalog API on
//! every view and lives only in view state.

use serde::{Deserialize, Serialize};

/// A catalog entry as shown on a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    /// Sprite URL, `None` when the API has no sprite for this entry.
    pub image: Option<String>,
    /// Elemental type names in slot order: `["grass", "poison"]`
    pub types: Vec<String>,
}

/// A page of catalog cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    /// Offset to request for the following page.
    pub next_offset: u32,
    /// Whether the list endpoint reported more entries after this page.
    pub has_more: bool,
}

/// A single base stat line: `hp = 45`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub base_stat: u32,
}

/// Full detail of one catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: u32,
    pub name: String,
    pub image: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<BaseStat>,
    /// Height in decimetres, as reported by the API.
    pub height: u32,
    /// Weight in hectograms, as reported by the API.
    pub weight: u32,
    pub species_url: String,
}

impl ItemDetail {
    /// Card projection of this detail.
    pub fn to_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            types: self.types.clone(),
        }
    }
}

/// One species in an evolution chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub id: u32,
    pub name: String,
    pub image: String,
}

/// A detail page payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonProfile {
    pub detail: ItemDetail,
    pub evolutions: Vec<EvolutionStage>,
}

/// Primary key of a table-store row.
///
/// Tables created from the dashboard default to `int8` keys, others use `uuid` or
/// `text`; both shapes decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{n}"),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

/// A row in the `favorites` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Row id assigned by the table store; absent on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub user_id: String,
    pub pokemon_id: u32,
    /// Display name cached at the time the favorite was added.
    pub pokemon_name: String,
}

impl FavoriteRecord {
    pub fn new(user_id: &str, pokemon_id: u32, pokemon_name: &str) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            pokemon_id,
            pokemon_name: pokemon_name.to_string(),
        }
    }
}
