use crate::constants::KEYRING_SERVICE_NAME;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use keyring::{Entry, Error as KeyringError};
use log::{debug, error};

use super::storage::TokenStorage;

/// OS credential store backend. One keyring entry per storage key, all
/// under the same service name, so tokens survive process restarts.
#[derive(Debug, Default)]
pub struct KeyringStorage;

impl KeyringStorage {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> AppResult<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, key).map_err(|e| {
            error!(
                "Failed to create keyring entry - OS: {:?}, Error: {}",
                std::env::consts::OS,
                e
            );
            AppError::StorageError(format!("Failed to create keyring entry: {}", e))
        })
    }
}

#[async_trait]
impl TokenStorage for KeyringStorage {
    async fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        debug!("Saving {} to OS keyring", key);
        Self::entry(key)?.set_password(value).map_err(|e| {
            error!(
                "Failed to store {} in keyring - OS: {:?}, Error: {}",
                key,
                std::env::consts::OS,
                e
            );
            AppError::StorageError(format!("Failed to store {}: {}", key, e))
        })
    }

    async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        match Self::entry(key)?.get_password() {
            Ok(value) => {
                debug!("{} retrieved from keyring", key);
                Ok(Some(value))
            }
            Err(KeyringError::NoEntry) => {
                debug!("No {} entry found in keyring", key);
                Ok(None)
            }
            Err(e) => {
                error!(
                    "Keyring error for {} - OS: {:?}, Details: {}",
                    key,
                    std::env::consts::OS,
                    e
                );
                Err(AppError::StorageError(format!(
                    "Failed to retrieve {} from keyring: {}",
                    key, e
                )))
            }
        }
    }

    async fn remove_item(&self, key: &str) -> AppResult<()> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) => {
                debug!("{} cleared from keyring", key);
                Ok(())
            }
            Err(KeyringError::NoEntry) => {
                debug!("No {} entry to clear in keyring (already empty)", key);
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to clear {} from keyring - OS: {:?}, Error: {}",
                    key,
                    std::env::consts::OS,
                    e
                );
                Err(AppError::StorageError(format!(
                    "Failed to clear {}: {}",
                    key, e
                )))
            }
        }
    }
}
