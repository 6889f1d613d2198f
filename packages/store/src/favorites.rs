//! # Favorites — a user's saved catalog entries over an abstract table store
//!
//! [`Favorites`] holds the rules for the `favorites` table. All reads and writes go
//! through the [`FavoriteStore`] trait, so the same logic runs against the hosted
//! table store on the server (`api::backend::RestFavorites`) and the in-memory
//! store used in tests ([`crate::MemoryFavorites`]).
//!
//! ## [`FavoriteStore`] trait
//!
//! An async interface with four methods mirroring the equality-filtered table
//! operations the hosted store exposes: `find`, `insert`, `delete` and `list`.
//!
//! ## Rules
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`is_favorite`](Favorites::is_favorite) | Whether a row exists for the `(user, item)` pair. |
//! | [`add`](Favorites::add) | Inserts a row unless one already exists. |
//! | [`remove`](Favorites::remove) | Deletes every row for the pair. |
//! | [`toggle`](Favorites::toggle) | Flips the stored state and returns the new one. |
//! | [`list`](Favorites::list) | Rows ordered by item id, one per item. |
//!
//! The external table does not enforce uniqueness on `(user_id, pokemon_id)`, so
//! `add` checks before inserting and `list` collapses any duplicates that a
//! concurrent double-click still manages to create.

use std::future::Future;

use thiserror::Error;

use crate::models::FavoriteRecord;

/// Errors from the favorites table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The table store rejected or failed the request.
    #[error("Favorites backend error: {message}")]
    Backend { message: String },

    /// The operation needs a signed-in user.
    #[error("Sign in to manage favorites")]
    NotAuthenticated,
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Async access to the favorites table.
pub trait FavoriteStore {
    fn find(
        &self,
        user_id: &str,
        pokemon_id: u32,
    ) -> impl Future<Output = Result<Option<FavoriteRecord>, StoreError>> + Send;
    fn insert(
        &self,
        record: FavoriteRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn delete(
        &self,
        user_id: &str,
        pokemon_id: u32,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn list(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<FavoriteRecord>, StoreError>> + Send;
}

/// Favorites of every user, backed by a [`FavoriteStore`].
#[derive(Clone, Debug)]
pub struct Favorites<S> {
    store: S,
}

impl<S: FavoriteStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn is_favorite(&self, user_id: &str, pokemon_id: u32) -> Result<bool, StoreError> {
        Ok(self.store.find(user_id, pokemon_id).await?.is_some())
    }

    /// Add an entry to the user's favorites. Adding an existing favorite is a no-op.
    pub async fn add(
        &self,
        user_id: &str,
        pokemon_id: u32,
        pokemon_name: &str,
    ) -> Result<(), StoreError> {
        if self.is_favorite(user_id, pokemon_id).await? {
            return Ok(());
        }
        self.store
            .insert(FavoriteRecord::new(user_id, pokemon_id, pokemon_name))
            .await
    }

    pub async fn remove(&self, user_id: &str, pokemon_id: u32) -> Result<(), StoreError> {
        self.store.delete(user_id, pokemon_id).await
    }

    /// Flip the favorite state of an entry. Returns `true` when it is now a favorite.
    pub async fn toggle(
        &self,
        user_id: &str,
        pokemon_id: u32,
        pokemon_name: &str,
    ) -> Result<bool, StoreError> {
        if self.is_favorite(user_id, pokemon_id).await? {
            self.remove(user_id, pokemon_id).await?;
            Ok(false)
        } else {
            self.store
                .insert(FavoriteRecord::new(user_id, pokemon_id, pokemon_name))
                .await?;
            Ok(true)
        }
    }

    /// The user's favorites ordered by item id, one row per item.
    pub async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, StoreError> {
        let mut rows = self.store.list(user_id).await?;
        rows.sort_by_key(|r| r.pokemon_id);
        rows.dedup_by_key(|r| r.pokemon_id);
        Ok(rows)
    }
}

/// Share of a generation covered by `count` favorites, as a rounded percentage.
pub fn generation_progress(count: usize, generation_size: u32) -> u32 {
    if generation_size == 0 {
        return 0;
    }
    let percent = (count as f64 / generation_size as f64) * 100.0;
    percent.round() as u32
}
