use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use log::error;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

/// Durable key/value storage for session tokens.
#[async_trait]
pub trait TokenStorage: Send + Sync + Debug {
    async fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    async fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    async fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// In-process storage. Sessions last as long as the process does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for MemoryStorage {
    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self.items.write().map_err(|e| {
            error!("Failed to acquire write lock on memory storage: {}", e);
            AppError::StorageError(format!("Failed to write {}: {}", key, e))
        })?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let items = self.items.read().map_err(|e| {
            error!("Failed to acquire read lock on memory storage: {}", e);
            AppError::StorageError(format!("Failed to read {}: {}", key, e))
        })?;
        Ok(items.get(key).cloned())
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut items = self.items.write().map_err(|e| {
            error!("Failed to acquire write lock on memory storage: {}", e);
            AppError::StorageError(format!("Failed to remove {}: {}", key, e))
        })?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").await.unwrap(), None);

        storage.set_item("k", "v").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), Some("v".to_string()));

        storage.remove_item("k").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        storage.remove_item("never-set").await.unwrap();
    }
}
