use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::{AppError, Result};
use crate::models::{ChatMessage, PresetStyle, UserAccount};

pub mod memory;
pub mod postgres;

/// A record together with the store-managed version used for conditional
/// writes. Versions are per record; cross-record atomicity is not offered.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub record: T,
    pub version: i64,
}

/// Account persistence with a compare-and-swap write contract: read a record
/// and its version, compute the new record, then write conditionally on the
/// version still matching. Callers retry on conflict; the store performs no
/// other coordination.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get(&self, uid: &str) -> Result<Option<Versioned<UserAccount>>>;

    /// Creates the record if no record with the same uid exists. Returns
    /// false when one already does.
    async fn insert(&self, account: &UserAccount) -> Result<bool>;

    /// Overwrites the record if its stored version equals `expected_version`.
    /// Returns false on a version conflict.
    async fn update(&self, account: &UserAccount, expected_version: i64) -> Result<bool>;
}

#[async_trait]
pub trait StyleStore: Send + Sync {
    /// Active styles ordered by `sort_order`.
    async fn list_active(&self) -> Result<Vec<PresetStyle>>;
}

#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn append(&self, message: &ChatMessage) -> Result<()>;
}

#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub styles: Arc<dyn StyleStore>,
    pub chat: Arc<dyn ChatStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(memory::MemoryAccountStore::new()),
            styles: Arc::new(memory::MemoryStyleStore::new()),
            chat: Arc::new(memory::MemoryChatStore::new()),
        }
    }
}

pub async fn create_stores(config: &Config) -> Result<Stores> {
    match config.store_backend.as_str() {
        "memory" => Ok(Stores::in_memory()),
        "postgres" => postgres::connect(&config.database_url).await,
        other => Err(AppError::Config(format!(
            "Unsupported store backend: {}",
            other
        ))),
    }
}
