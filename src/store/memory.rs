use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::errors::Result;
use crate::models::{ChatMessage, PresetStyle, UserAccount};
use crate::store::{AccountStore, ChatStore, StyleStore, Versioned};

/// In-process backend used when the document store is disabled, and by the
/// test suite. The conditional-write contract is upheld by taking the map
/// lock across the version check and the write.
pub struct MemoryAccountStore {
    records: Mutex<HashMap<String, (UserAccount, i64)>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn get(&self, uid: &str) -> Result<Option<Versioned<UserAccount>>> {
        let records = self.records.lock().await;
        Ok(records.get(uid).map(|(record, version)| Versioned {
            record: record.clone(),
            version: *version,
        }))
    }

    async fn insert(&self, account: &UserAccount) -> Result<bool> {
        let mut records = self.records.lock().await;
        if records.contains_key(&account.uid) {
            return Ok(false);
        }
        records.insert(account.uid.clone(), (account.clone(), 0));
        Ok(true)
    }

    async fn update(&self, account: &UserAccount, expected_version: i64) -> Result<bool> {
        let mut records = self.records.lock().await;
        match records.get_mut(&account.uid) {
            Some((record, version)) if *version == expected_version => {
                *record = account.clone();
                *version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

pub struct MemoryStyleStore {
    styles: Mutex<Vec<PresetStyle>>,
}

impl MemoryStyleStore {
    pub fn new() -> Self {
        Self {
            styles: Mutex::new(Vec::new()),
        }
    }

    pub fn with_styles(styles: Vec<PresetStyle>) -> Self {
        Self {
            styles: Mutex::new(styles),
        }
    }
}

impl Default for MemoryStyleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StyleStore for MemoryStyleStore {
    async fn list_active(&self) -> Result<Vec<PresetStyle>> {
        let styles = self.styles.lock().await;
        let mut active: Vec<PresetStyle> =
            styles.iter().filter(|s| s.active).cloned().collect();
        active.sort_by_key(|s| s.sort_order);
        Ok(active)
    }
}

pub struct MemoryChatStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }
}

impl Default for MemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for MemoryChatStore {
    async fn append(&self, message: &ChatMessage) -> Result<()> {
        self.messages.lock().await.push(message.clone());
        Ok(())
    }
}
