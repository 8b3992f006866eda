// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory key/value store

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::errors::HostingResult;

/// Process-local [`KeyValueStore`]
///
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> HostingResult<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> HostingResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> HostingResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> HostingResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
