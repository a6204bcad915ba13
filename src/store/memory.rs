//! In-memory `SessionStore`, lives as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::SessionStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    settings: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.settings.read().await.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        debug!(key, "Setting stored");
        self.settings
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
