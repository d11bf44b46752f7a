use std::sync::{Arc, RwLock};

use log::{info, warn};

use super::storage::TokenStorage;
use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

#[derive(Debug)]
pub struct TokenManager {
    access_token: RwLock<Option<String>>,
    refresh_token: RwLock<Option<String>>,
    backend: Arc<dyn TokenStorage>,
}

impl TokenManager {
    pub fn new(backend: Arc<dyn TokenStorage>) -> Self {
        Self {
            access_token: RwLock::new(None),
            refresh_token: RwLock::new(None),
            backend,
        }
    }

    fn read_slot(slot: &RwLock<Option<String>>) -> Option<String> {
        match slot.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                warn!("Token cache lock poisoned: {}", e);
                None
            }
        }
    }

    fn write_slot(slot: &RwLock<Option<String>>, value: Option<String>) {
        match slot.write() {
            Ok(mut guard) => *guard = value,
            Err(e) => warn!("Token cache lock poisoned: {}", e),
        }
    }

    /// Load both tokens from the storage backend into the cache.
    ///
    /// Called once at startup. Backend failures leave the process
    /// unauthenticated rather than failing the bootstrap.
    pub async fn hydrate(&self) {
        match self.backend.get_item(ACCESS_TOKEN_KEY).await {
            Ok(stored) => {
                if stored.is_some() {
                    info!("Loaded access token from storage");
                }
                Self::write_slot(&self.access_token, stored);
            }
            Err(e) => warn!("Failed to load access token from storage: {}", e),
        }
        match self.backend.get_item(REFRESH_TOKEN_KEY).await {
            Ok(stored) => Self::write_slot(&self.refresh_token, stored),
            Err(e) => warn!("Failed to load refresh token from storage: {}", e),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        Self::read_slot(&self.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        Self::read_slot(&self.refresh_token)
    }

    /// Whether an access token is present.
    ///
    /// Presence is the only criterion; `exp` is not examined. An expired
    /// token is reported valid here, gets rejected by the backend with a
    /// 401, and the request pipeline refreshes it at that point.
    pub fn has_valid_token(&self) -> bool {
        self.access_token().is_some()
    }

    /// Store a token pair. The refresh token slot is left untouched when
    /// the response carried no refresh token.
    ///
    /// The cache is written first; a storage backend failure is logged
    /// and the tokens stay memory-only for this session.
    pub async fn set_tokens(&self, access: &str, refresh: Option<&str>) {
        Self::write_slot(&self.access_token, Some(access.to_string()));
        if let Err(e) = self.backend.set_item(ACCESS_TOKEN_KEY, access).await {
            warn!(
                "Failed to persist access token: {}. Token only stored in memory.",
                e
            );
        }

        if let Some(refresh) = refresh {
            Self::write_slot(&self.refresh_token, Some(refresh.to_string()));
            if let Err(e) = self.backend.set_item(REFRESH_TOKEN_KEY, refresh).await {
                warn!(
                    "Failed to persist refresh token: {}. Token only stored in memory.",
                    e
                );
            }
        }
    }

    /// Overwrite the access token alone, used after a refresh round trip.
    pub async fn set_access_token(&self, access: &str) {
        self.set_tokens(access, None).await;
    }

    /// Overwrite the refresh token alone.
    pub async fn set_refresh_token(&self, refresh: &str) {
        Self::write_slot(&self.refresh_token, Some(refresh.to_string()));
        if let Err(e) = self.backend.set_item(REFRESH_TOKEN_KEY, refresh).await {
            warn!(
                "Failed to persist refresh token: {}. Token only stored in memory.",
                e
            );
        }
    }

    /// Drop both tokens from the cache and the storage backend.
    pub async fn clear(&self) {
        Self::write_slot(&self.access_token, None);
        Self::write_slot(&self.refresh_token, None);

        if let Err(e) = self.backend.remove_item(ACCESS_TOKEN_KEY).await {
            warn!("Failed to remove access token from storage: {}", e);
        }
        if let Err(e) = self.backend.remove_item(REFRESH_TOKEN_KEY).await {
            warn!("Failed to remove refresh token from storage: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::MemoryStorage;
    use crate::error::{AppError, AppResult};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FailingStorage;

    #[async_trait]
    impl TokenStorage for FailingStorage {
        async fn set_item(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::StorageError("backend down".to_string()))
        }

        async fn get_item(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::StorageError("backend down".to_string()))
        }

        async fn remove_item(&self, _key: &str) -> AppResult<()> {
            Err(AppError::StorageError("backend down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_set_tokens_persists_and_hydrates() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = TokenManager::new(Arc::clone(&storage) as Arc<dyn TokenStorage>);
        manager.set_tokens("access-1", Some("refresh-1")).await;

        // A fresh manager over the same backend sees the stored pair.
        let restored = TokenManager::new(storage as Arc<dyn TokenStorage>);
        assert_eq!(restored.access_token(), None);
        restored.hydrate().await;
        assert_eq!(restored.access_token(), Some("access-1".to_string()));
        assert_eq!(restored.refresh_token(), Some("refresh-1".to_string()));
    }

    #[tokio::test]
    async fn test_set_tokens_without_refresh_keeps_existing() {
        let manager = TokenManager::new(Arc::new(MemoryStorage::new()));
        manager.set_tokens("access-1", Some("refresh-1")).await;
        manager.set_tokens("access-2", None).await;

        assert_eq!(manager.access_token(), Some("access-2".to_string()));
        assert_eq!(manager.refresh_token(), Some("refresh-1".to_string()));
    }

    #[tokio::test]
    async fn test_set_refresh_token_leaves_access_alone() {
        let manager = TokenManager::new(Arc::new(MemoryStorage::new()));
        manager.set_tokens("access-1", Some("refresh-1")).await;
        manager.set_refresh_token("refresh-2").await;

        assert_eq!(manager.access_token(), Some("access-1".to_string()));
        assert_eq!(manager.refresh_token(), Some("refresh-2".to_string()));
    }

    #[tokio::test]
    async fn test_clear_removes_both_slots_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = TokenManager::new(Arc::clone(&storage) as Arc<dyn TokenStorage>);
        manager.set_tokens("access-1", Some("refresh-1")).await;
        manager.clear().await;

        assert!(!manager.has_valid_token());
        assert_eq!(manager.refresh_token(), None);
        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).await.unwrap(), None);
        assert_eq!(storage.get_item(REFRESH_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_has_valid_token_ignores_expiry() {
        let manager = TokenManager::new(Arc::new(MemoryStorage::new()));
        // exp 1234567890 is long past; presence still counts.
        let expired =
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJleHAiOjEyMzQ1Njc4OTAsInN1YiI6InRlc3QifQ.sig";
        manager.set_tokens(expired, None).await;
        assert!(manager.has_valid_token());
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_tokens_in_memory() {
        let manager = TokenManager::new(Arc::new(FailingStorage));
        manager.set_tokens("access-1", Some("refresh-1")).await;
        assert_eq!(manager.access_token(), Some("access-1".to_string()));
        assert_eq!(manager.refresh_token(), Some("refresh-1".to_string()));

        manager.hydrate().await;
        // Hydrate failure must not wipe what is already cached.
        assert_eq!(manager.access_token(), Some("access-1".to_string()));
    }
}
