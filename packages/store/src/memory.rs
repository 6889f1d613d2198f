use std::sync::{Arc, Mutex};

use crate::favorites::{FavoriteStore, StoreError};
use crate::models::{FavoriteRecord, RowId};

/// In-memory favorites table for testing.
///
/// Like the hosted table it stands in for, inserts do not check for an existing
/// `(user_id, pokemon_id)` row.
#[derive(Clone, Debug, Default)]
pub struct MemoryFavorites {
    rows: Arc<Mutex<Vec<FavoriteRecord>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<FavoriteRecord>>, StoreError> {
        self.rows
            .lock()
            .map_err(|e| StoreError::backend(e.to_string()))
    }
}

impl FavoriteStore for MemoryFavorites {
    async fn find(
        &self,
        user_id: &str,
        pokemon_id: u32,
    ) -> Result<Option<FavoriteRecord>, StoreError> {
        Ok(self
            .lock_rows()?
            .iter()
            .find(|r| r.user_id == user_id && r.pokemon_id == pokemon_id)
            .cloned())
    }

    async fn insert(&self, mut record: FavoriteRecord) -> Result<(), StoreError> {
        let id = {
            let mut next = self
                .next_id
                .lock()
                .map_err(|e| StoreError::backend(e.to_string()))?;
            *next += 1;
            *next
        };
        record.id = Some(RowId::Number(id));
        self.lock_rows()?.push(record);
        Ok(())
    }

    async fn delete(&self, user_id: &str, pokemon_id: u32) -> Result<(), StoreError> {
        self.lock_rows()?
            .retain(|r| !(r.user_id == user_id && r.pokemon_id == pokemon_id));
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, StoreError> {
        Ok(self
            .lock_rows()?
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_row_ids() {
        let store = MemoryFavorites::new();
        store.insert(FavoriteRecord::new("u1", 7, "squirtle")).await.unwrap();
        store.insert(FavoriteRecord::new("u1", 8, "wartortle")).await.unwrap();

        let rows = store.list("u1").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, Some(RowId::Number(1)));
        assert_eq!(rows[1].id, Some(RowId::Number(2)));
    }

    #[tokio::test]
    async fn test_insert_allows_duplicates() {
        let store = MemoryFavorites::new();
        store.insert(FavoriteRecord::new("u1", 7, "squirtle")).await.unwrap();
        store.insert(FavoriteRecord::new("u1", 7, "squirtle")).await.unwrap();
        assert_eq!(store.list("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_and_delete() {
        let store = MemoryFavorites::new();
        store.insert(FavoriteRecord::new("u1", 7, "squirtle")).await.unwrap();
        store.insert(FavoriteRecord::new("u2", 7, "squirtle")).await.unwrap();

        assert!(store.find("u1", 7).await.unwrap().is_some());
        store.delete("u1", 7).await.unwrap();
        assert!(store.find("u1", 7).await.unwrap().is_none());
        assert!(store.find("u2", 7).await.unwrap().is_some());
    }
}
