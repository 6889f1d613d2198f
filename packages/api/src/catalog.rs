//! # Catalog client — PokéAPI over reqwest
//!
//! Read-only access to the public catalog API. Every call goes to the network;
//! nothing is cached between requests.
//!
//! | Method | Endpoints |
//! |--------|-----------|
//! | [`page`](CatalogClient::page) | `GET /pokemon?limit=&offset=`, then one `GET` per listed entry, fanned out and joined. |
//! | [`lookup`](CatalogClient::lookup) | `GET /pokemon/{name or id}` |
//! | [`profile`](CatalogClient::profile) | `GET /pokemon/{key}` → species → evolution chain |
//! | [`items_for`](CatalogClient::items_for) | One `GET /pokemon/{id}` per id, fanned out and joined. |
//!
//! The client is a lazy process-wide singleton ([`catalog_client`]) so all server
//! functions share one connection pool.

use std::time::Duration;

use futures::future::{join_all, try_join_all};
use reqwest::Url;
use serde::de::DeserializeOwned;
use store::config::CatalogConfig;
use store::pokeapi::{RawEvolutionChain, RawPokemon, RawSpecies, ResourceList};
use store::{extract_evolution_chain, CatalogItem, CatalogPage, EvolutionStage, PokemonProfile};
use tokio::sync::OnceCell;

use crate::error::{ApiError, ApiResult};
use crate::settings::settings;

static CLIENT: OnceCell<CatalogClient> = OnceCell::const_new();

/// Get or initialize the shared catalog client.
pub async fn catalog_client() -> ApiResult<&'static CatalogClient> {
    CLIENT
        .get_or_try_init(|| async { CatalogClient::new(&settings().catalog) })
        .await
}

pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::Config(format!("Invalid catalog URL {}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "Catalog URL {} cannot carry a path",
                config.base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url,
            page_size: config.page_size,
        })
    }

    /// `{base}/{segments...}`, each segment percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::Config(format!("Catalog URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn list_url(&self, offset: u32, limit: u32) -> ApiResult<Url> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    fn pokemon_url(&self, key: &str) -> ApiResult<Url> {
        self.endpoint(&["pokemon", key])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(response.json().await?)
    }

    /// Fetch one entry by an already normalized key; `None` when the API has no
    /// such entry.
    pub async fn pokemon(&self, key: &str) -> ApiResult<Option<RawPokemon>> {
        match self.get_json(self.pokemon_url(key)?.as_str()).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// One page of cards. Detail requests for the listed entries run concurrently and
    /// the page fails if any of them fails.
    pub async fn page(&self, offset: u32) -> ApiResult<CatalogPage> {
        let limit = self.page_size;
        let list: ResourceList = self.get_json(self.list_url(offset, limit)?.as_str()).await?;

        let details = try_join_all(
            list.results
                .iter()
                .map(|entry| self.get_json::<RawPokemon>(&entry.url)),
        )
        .await?;

        Ok(CatalogPage {
            items: details.iter().map(RawPokemon::to_item).collect(),
            next_offset: offset.saturating_add(limit),
            has_more: list.next.is_some(),
        })
    }

    /// Exact lookup by name or id.
    pub async fn lookup(&self, term: &str) -> ApiResult<Option<CatalogItem>> {
        let Some(key) = normalize_search_term(term) else {
            return Ok(None);
        };
        Ok(self.pokemon(&key).await?.map(|raw| raw.to_item()))
    }

    /// Detail page payload. Evolution failures are logged and leave the chain empty.
    pub async fn profile(&self, key: &str) -> ApiResult<Option<PokemonProfile>> {
        let Some(key) = normalize_search_term(key) else {
            return Ok(None);
        };
        let Some(raw) = self.pokemon(&key).await? else {
            return Ok(None);
        };

        let evolutions = match self.evolution_chain(&raw.species.url).await {
            Ok(stages) => stages,
            Err(e) => {
                tracing::error!("Failed to load evolution chain for {}: {}", raw.name, e);
                Vec::new()
            }
        };

        Ok(Some(PokemonProfile {
            detail: raw.to_detail(),
            evolutions,
        }))
    }

    /// Species → evolution chain → flattened stages.
    pub async fn evolution_chain(&self, species_url: &str) -> ApiResult<Vec<EvolutionStage>> {
        let species: RawSpecies = self.get_json(species_url).await?;
        let Some(link) = species.evolution_chain else {
            return Ok(Vec::new());
        };
        let chain: RawEvolutionChain = self.get_json(&link.url).await?;
        Ok(extract_evolution_chain(&chain.chain))
    }

    /// Cards for the given ids, in order. Entries that fail to load are logged and
    /// left out.
    pub async fn items_for(&self, ids: &[u32]) -> Vec<CatalogItem> {
        let results = join_all(ids.iter().map(|id| async move {
            (*id, self.pokemon(&id.to_string()).await)
        }))
        .await;

        results
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(Some(raw)) => Some(raw.to_item()),
                Ok(None) => {
                    tracing::warn!("Pokémon {} not found in catalog", id);
                    None
                }
                Err(e) => {
                    tracing::error!("Failed to load Pokémon {}: {}", id, e);
                    None
                }
            })
            .collect()
    }
}

/// Catalog key for a search term, or `None` when the term cannot name an entry.
///
/// Lower-cases and trims, accepts the `#025` form shown on cards, and drops leading
/// zeros from numbers. Catalog keys are ASCII letters, digits and hyphens; anything
/// else is rejected before a request is built.
pub fn normalize_search_term(term: &str) -> Option<String> {
    let key = term.trim().trim_start_matches('#').trim().to_lowercase();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    if key.chars().all(|c| c.is_ascii_digit()) {
        let number = key.trim_start_matches('0');
        return Some(if number.is_empty() { "0" } else { number }.to_string());
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::serve;

    fn client(base_url: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: base_url.to_string(),
            page_size: 2,
        })
        .unwrap()
    }

    fn pokemon_json(base: &str, id: u32, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "sprites": { "front_default": format!("{base}/sprites/{id}.png") },
            "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }],
            "species": { "name": name, "url": format!("{base}/pokemon-species/{id}") }
        })
    }

    fn find_pokemon(base: &str, key: &str) -> Option<Value> {
        let (id, name) = match key {
            "25" | "pikachu" => (25, "pikachu"),
            "26" | "raichu" => (26, "raichu"),
            "172" | "pichu" => (172, "pichu"),
            "132" | "ditto" => (132, "ditto"),
            _ => return None,
        };
        Some(pokemon_json(base, id, name))
    }

    fn list_json(base: &str, ids: &[u32], has_next: bool) -> Value {
        let results: Vec<Value> = ids
            .iter()
            .map(|id| json!({ "name": id.to_string(), "url": format!("{base}/pokemon/{id}") }))
            .collect();
        let next = if has_next {
            json!(format!("{base}/pokemon?offset=2&limit=2"))
        } else {
            Value::Null
        };
        json!({
            "count": 1302,
            "next": next,
            "previous": null,
            "results": results
        })
    }

    /// A small PokéAPI: pichu, pikachu and raichu share a chain, ditto's species
    /// endpoint is broken, and the list is paged by offset.
    async fn catalog_stub() -> String {
        serve(|base| {
            let list_base = base.to_string();
            let detail_base = base.to_string();
            Router::new()
                .route(
                    "/pokemon",
                    get(move |Query(query): Query<HashMap<String, String>>| async move {
                        let offset: u32 = query
                            .get("offset")
                            .and_then(|o| o.parse().ok())
                            .unwrap_or_default();
                        let body = match offset {
                            0 => list_json(&list_base, &[25, 26], true),
                            2 => list_json(&list_base, &[172], false),
                            3 => list_json(&list_base, &[25, 999], true),
                            _ => list_json(&list_base, &[], false),
                        };
                        Json(body)
                    }),
                )
                .route(
                    "/pokemon/{key}",
                    get(move |Path(key): Path<String>| async move {
                        match find_pokemon(&detail_base, &key) {
                            Some(body) => Json(body).into_response(),
                            None => StatusCode::NOT_FOUND.into_response(),
                        }
                    }),
                )
                .route(
                    "/pokemon-species/{id}",
                    get({
                        let base = base.to_string();
                        move |Path(id): Path<u32>| async move {
                            if id == 132 {
                                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                            }
                            Json(json!({
                                "id": id,
                                "name": "species",
                                "evolution_chain": { "url": format!("{base}/evolution-chain/10") }
                            }))
                            .into_response()
                        }
                    }),
                )
                .route("/evolution-chain/{id}", get(evolution_chain))
        })
        .await
    }

    async fn evolution_chain() -> Response {
        let species = |id: u32, name: &str| {
            let url = format!("https://pokeapi.co/api/v2/pokemon-species/{id}/");
            json!({ "name": name, "url": url })
        };
        Json(json!({
            "id": 10,
            "chain": {
                "species": species(172, "pichu"),
                "evolves_to": [{
                    "species": species(25, "pikachu"),
                    "evolves_to": [{ "species": species(26, "raichu"), "evolves_to": [] }]
                }]
            }
        }))
        .into_response()
    }

    #[test]
    fn test_urls() {
        let client = client("https://pokeapi.co/api/v2/");
        assert_eq!(
            client.list_url(40, 20).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon?limit=20&offset=40"
        );
        assert_eq!(
            client.pokemon_url("pikachu").unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[test]
    fn test_key_is_one_encoded_segment() {
        let client = client("https://pokeapi.co/api/v2");
        assert_eq!(
            client.pokemon_url("a/../type/1").unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/a%2F..%2Ftype%2F1"
        );
        assert_eq!(
            client.pokemon_url("#25").unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/%2325"
        );
    }

    #[test]
    fn test_invalid_base_url_is_a_config_error() {
        let result = CatalogClient::new(&CatalogConfig {
            base_url: "not a url".to_string(),
            page_size: 20,
        });
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_normalize_search_term() {
        assert_eq!(normalize_search_term("  Pikachu "), Some("pikachu".to_string()));
        assert_eq!(normalize_search_term("25"), Some("25".to_string()));
        assert_eq!(normalize_search_term("#025"), Some("25".to_string()));
        assert_eq!(normalize_search_term("# 7"), Some("7".to_string()));
        assert_eq!(normalize_search_term("000"), Some("0".to_string()));
        assert_eq!(normalize_search_term("Mr-Mime"), Some("mr-mime".to_string()));
        assert_eq!(normalize_search_term("   "), None);
        assert_eq!(normalize_search_term("#"), None);
        assert_eq!(normalize_search_term("a/../type/1"), None);
        assert_eq!(normalize_search_term("pika chu"), None);
    }

    #[tokio::test]
    async fn test_blank_lookup_skips_network() {
        // Unroutable base URL: any request would fail.
        let client = client("http://127.0.0.1:9");
        assert_eq!(client.lookup("  ").await.unwrap(), None);
        assert_eq!(client.lookup("a/../type/1").await.unwrap(), None);
        assert!(client.profile("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_fans_out_and_reports_more() {
        let client = client(&catalog_stub().await);

        let page = client.page(0).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["pikachu", "raichu"]);
        assert_eq!(page.next_offset, 2);
        assert!(page.has_more);

        let last = client.page(2).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.next_offset, 4);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn test_page_fails_when_a_detail_fails() {
        let client = client(&catalog_stub().await);
        let err = client.page(3).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_page_offset_does_not_overflow() {
        let client = client(&catalog_stub().await);
        let page = client.page(u32::MAX - 1).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_offset, u32::MAX);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_lookup() {
        let client = client(&catalog_stub().await);

        let found = client.lookup("Pikachu").await.unwrap().unwrap();
        assert_eq!(found.id, 25);
        assert_eq!(found.types, vec!["electric"]);

        let by_card_id = client.lookup("#025").await.unwrap().unwrap();
        assert_eq!(by_card_id.name, "pikachu");

        assert_eq!(client.lookup("missingno").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_profile_with_evolution_chain() {
        let client = client(&catalog_stub().await);
        let profile = client.profile("26").await.unwrap().unwrap();
        assert_eq!(profile.detail.name, "raichu");
        let chain: Vec<u32> = profile.evolutions.iter().map(|s| s.id).collect();
        assert_eq!(chain, vec![172, 25, 26]);
    }

    #[tokio::test]
    async fn test_profile_survives_broken_species() {
        let client = client(&catalog_stub().await);
        let profile = client.profile("ditto").await.unwrap().unwrap();
        assert_eq!(profile.detail.id, 132);
        assert!(profile.evolutions.is_empty());

        assert!(client.profile("missingno").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_items_for_drops_missing_entries() {
        let client = client(&catalog_stub().await);
        let items = client.items_for(&[172, 999, 25]).await;
        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![172, 25]);
    }
}
