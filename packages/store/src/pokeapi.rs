//! Wire payloads of the PokéAPI REST endpoints and their mapping to display models.
//!
//! Only the fields the application renders are declared; serde skips the rest.

use serde::Deserialize;

use crate::format::artwork_url;
use crate::models::{BaseStat, CatalogItem, ItemDetail};

/// A `{ name, url }` reference as used throughout the API.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Response of a paginated list endpoint (`/pokemon?limit=&offset=`).
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceList {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// Response of `/pokemon/{id or name}`.
#[derive(Clone, Debug, Deserialize)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    pub species: NamedResource,
}

impl RawPokemon {
    /// Front sprite, falling back to the official artwork.
    pub fn sprite(&self) -> Option<String> {
        self.sprites.front_default.clone().or_else(|| {
            self.sprites
                .other
                .official_artwork
                .as_ref()
                .and_then(|a| a.front_default.clone())
        })
    }

    fn type_names(&self) -> Vec<String> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.clone()).collect()
    }

    pub fn to_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name.clone(),
            image: self.sprite(),
            types: self.type_names(),
        }
    }

    pub fn to_detail(&self) -> ItemDetail {
        ItemDetail {
            id: self.id,
            name: self.name.clone(),
            image: self.sprite().or_else(|| Some(artwork_url(self.id))),
            types: self.type_names(),
            abilities: self.abilities.iter().map(|a| a.ability.name.clone()).collect(),
            stats: self
                .stats
                .iter()
                .map(|s| BaseStat {
                    name: s.stat.name.clone(),
                    base_stat: s.base_stat,
                })
                .collect(),
            height: self.height,
            weight: self.weight,
            species_url: self.species.url.clone(),
        }
    }
}

/// Response of `/pokemon-species/{id}`, reduced to the evolution link.
#[derive(Clone, Debug, Deserialize)]
pub struct RawSpecies {
    pub id: u32,
    pub name: String,
    pub evolution_chain: Option<ResourceLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ResourceLink {
    pub url: String,
}

/// Response of `/evolution-chain/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

/// A node of the evolution tree.
#[derive(Clone, Debug, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// Numeric id at the end of a resource URL: `.../pokemon-species/133/` → `133`.
pub fn id_from_resource_url(url: &str) -> Option<u32> {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .and_then(|segment| segment.parse().ok())
}
