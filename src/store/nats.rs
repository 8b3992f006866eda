// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS JetStream KV Store Implementation
//!
//! Persists hosting records in a JetStream key/value bucket.
//!
//! # Example
//!
//! ```rust,no_run
//! use hosting_server::store::{KvBucketConfig, NatsKeyValueStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = async_nats::connect("nats://localhost:4222").await?;
//!     let jetstream = async_nats::jetstream::new(client);
//!
//!     let store = NatsKeyValueStore::open(jetstream, KvBucketConfig::default()).await?;
//!     Ok(())
//! }
//! ```

use async_nats::jetstream::{self, kv};
use async_trait::async_trait;
use futures::TryStreamExt;
use tracing::{debug, info};

use super::KeyValueStore;
use crate::errors::{HostingError, HostingResult};

/// Configuration for the hostings KV bucket
#[derive(Debug, Clone)]
pub struct KvBucketConfig {
    /// Bucket name
    pub bucket: String,

    /// Number of historical values kept per key
    pub history: i64,

    /// Storage type (File or Memory)
    pub storage: StorageType,

    /// Number of replicas (for clustered NATS)
    pub replicas: usize,
}

impl Default for KvBucketConfig {
    fn default() -> Self {
        Self {
            bucket: "hostings".to_string(),
            history: 1,
            storage: StorageType::File,
            replicas: 1,
        }
    }
}

/// Storage type for the bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// File-based storage (persistent across restarts)
    File,
    /// Memory-based storage (faster, but lost on restart)
    Memory,
}

/// NATS JetStream KV-backed [`KeyValueStore`]
#[derive(Clone)]
pub struct NatsKeyValueStore {
    kv: kv::Store,
}

impl NatsKeyValueStore {
    /// Open the configured bucket, creating it if it does not exist yet
    pub async fn open(
        jetstream: jetstream::Context,
        config: KvBucketConfig,
    ) -> HostingResult<Self> {
        let kv = match jetstream.get_key_value(config.bucket.clone()).await {
            Ok(kv) => {
                info!(bucket = %config.bucket, "Found existing KV bucket");
                kv
            }
            Err(_) => {
                let storage = match config.storage {
                    StorageType::File => jetstream::stream::StorageType::File,
                    StorageType::Memory => jetstream::stream::StorageType::Memory,
                };

                let kv = jetstream
                    .create_key_value(kv::Config {
                        bucket: config.bucket.clone(),
                        history: config.history,
                        storage,
                        num_replicas: config.replicas,
                        ..Default::default()
                    })
                    .await
                    .map_err(HostingError::backend)?;

                info!(bucket = %config.bucket, "Created KV bucket");
                kv
            }
        };

        Ok(Self { kv })
    }
}

#[async_trait]
impl KeyValueStore for NatsKeyValueStore {
    async fn get(&self, key: &str) -> HostingResult<Option<Vec<u8>>> {
        let entry = self
            .kv
            .get(key.to_string())
            .await
            .map_err(HostingError::backend)?;

        debug!(key, found = entry.is_some(), "KV get");
        Ok(entry.map(|bytes| bytes.to_vec()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> HostingResult<()> {
        self.kv
            .put(key.to_string(), value.into())
            .await
            .map_err(HostingError::backend)?;

        debug!(key, "KV put");
        Ok(())
    }

    async fn delete(&self, key: &str) -> HostingResult<()> {
        self.kv
            .delete(key.to_string())
            .await
            .map_err(HostingError::backend)?;

        debug!(key, "KV delete");
        Ok(())
    }

    async fn keys(&self) -> HostingResult<Vec<String>> {
        let keys: Vec<String> = self
            .kv
            .keys()
            .await
            .map_err(HostingError::backend)?
            .try_collect()
            .await
            .map_err(HostingError::backend)?;

        debug!(count = keys.len(), "KV keys");
        Ok(keys)
    }
}
