//! `SessionStore` trait: the session collaborator the flow writes into.

use async_trait::async_trait;

use crate::error::StoreError;

/// Key/value settings store for per-session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a setting, `None` if it was never written.
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Write (or overwrite) a setting.
    async fn set_setting(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError>;
}
