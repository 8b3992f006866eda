// Copyright (c) 2025 - Cowboy AI, Inc.
//! Key/Value Store Abstraction
//!
//! The substrate hosting records are persisted to. The repository only needs
//! four primitives from it:
//!
//! ```text
//! get(key)        → value or None
//! put(key, value)
//! delete(key)
//! keys()          → every key currently stored
//! ```
//!
//! Each individual write is assumed crash-consistent; no durability or
//! recovery logic is layered on top.
//!
//! # Implementations
//!
//! - [`InMemoryKeyValueStore`] - process-local map, for tests and local runs
//! - [`NatsKeyValueStore`] - NATS JetStream KV bucket

use async_trait::async_trait;

use crate::errors::HostingResult;

pub mod memory;
pub mod nats;

pub use memory::InMemoryKeyValueStore;
pub use nats::{KvBucketConfig, NatsKeyValueStore, StorageType};

/// Key/value persistence backend
///
/// All failures are reported as [`crate::HostingError::Backend`]. A missing
/// key is not an error: `get` returns `Ok(None)` and `delete` is a no-op.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> HostingResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: Vec<u8>) -> HostingResult<()>;

    /// Remove `key`
    async fn delete(&self, key: &str) -> HostingResult<()>;

    /// Enumerate every key in the store
    async fn keys(&self) -> HostingResult<Vec<String>>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> HostingResult<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> HostingResult<()> {
        (**self).put(key, value).await
    }

    async fn delete(&self, key: &str) -> HostingResult<()> {
        (**self).delete(key).await
    }

    async fn keys(&self) -> HostingResult<Vec<String>> {
        (**self).keys().await
    }
}
