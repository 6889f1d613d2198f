//! The `favorites` table as a [`FavoriteStore`].

use store::{FavoriteRecord, FavoriteStore, StoreError};

use super::client::BackendClient;
use super::FAVORITES_TABLE;

/// Favorites of the signed-in user, read and written with their access token so
/// the table's row-level policies apply.
#[derive(Debug, Clone)]
pub struct RestFavorites {
    client: BackendClient,
    access_token: String,
}

impl RestFavorites {
    pub fn new(client: BackendClient, access_token: impl Into<String>) -> Self {
        Self {
            client,
            access_token: access_token.into(),
        }
    }
}

impl FavoriteStore for RestFavorites {
    async fn find(
        &self,
        user_id: &str,
        pokemon_id: u32,
    ) -> Result<Option<FavoriteRecord>, StoreError> {
        let rows: Vec<FavoriteRecord> = self
            .client
            .from_table(FAVORITES_TABLE, Some(&self.access_token))
            .eq("user_id", user_id)
            .eq("pokemon_id", pokemon_id)
            .select()
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, record: FavoriteRecord) -> Result<(), StoreError> {
        self.client
            .from_table(FAVORITES_TABLE, Some(&self.access_token))
            .insert(&record)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: &str, pokemon_id: u32) -> Result<(), StoreError> {
        self.client
            .from_table(FAVORITES_TABLE, Some(&self.access_token))
            .eq("user_id", user_id)
            .eq("pokemon_id", pokemon_id)
            .delete()
            .await?;
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, StoreError> {
        Ok(self
            .client
            .from_table(FAVORITES_TABLE, Some(&self.access_token))
            .eq("user_id", user_id)
            .order("pokemon_id", true)
            .select()
            .await?)
    }
}
