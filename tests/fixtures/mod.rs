// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for hosting-server
//!
//! Servers, commands and a repository that fails on demand.
//! Identifiers are fixed constants wherever a test names a hosting directly.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hosting_server::domain::{Hosting, HostingId, ResourceLimits, Server, ServerCapacity};
use hosting_server::errors::{HostingError, HostingResult};
use hosting_server::repository::{HostingRepository, InMemoryHostingRepository};
use hosting_server::service::{CreateHostingCommand, ServerService};
use hosting_server::store::{InMemoryKeyValueStore, KeyValueStore};

pub const HOSTING_ID_1: &str = "01934f4a-0001-7000-8000-000000000001";
pub const HOSTING_ID_2: &str = "01934f4a-0002-7000-8000-000000000002";

/// Server with 100 cores, 100 MB memory and 100 MB disk
pub fn server() -> Server {
    Server::new(ServerCapacity {
        cores: 100,
        memory_mb: 100,
        disk_mb: 100,
    })
}

/// Service over an in-memory repository with minimums of 1/1/1
pub fn service() -> ServerService<InMemoryHostingRepository> {
    ServerService::new(server(), InMemoryHostingRepository::new(ResourceLimits::default()))
}

pub fn command(name: &str, cores: u32, memory_mb: u64, disk_mb: u64) -> CreateHostingCommand {
    CreateHostingCommand {
        name: name.to_string(),
        cores,
        memory_mb,
        disk_mb,
    }
}

/// Smallest hosting the default limits accept
pub fn small(name: &str) -> CreateHostingCommand {
    command(name, 1, 1, 1)
}

/// Switches shared between a test and the [`FailingRepository`] it handed away
#[derive(Clone, Default)]
pub struct Faults {
    insert: Arc<AtomicBool>,
    update: Arc<AtomicBool>,
    listing: Arc<AtomicBool>,
}

impl Faults {
    pub fn fail_inserts(&self, fail: bool) {
        self.insert.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_listing(&self, fail: bool) {
        self.listing.store(fail, Ordering::SeqCst);
    }
}

/// In-memory repository whose writes can be made to fail like a lost backend
pub struct FailingRepository {
    inner: InMemoryHostingRepository,
    faults: Faults,
}

impl FailingRepository {
    pub fn new() -> (Self, Faults) {
        let faults = Faults::default();
        let repository = Self {
            inner: InMemoryHostingRepository::new(ResourceLimits::default()),
            faults: faults.clone(),
        };
        (repository, faults)
    }
}

fn injected() -> HostingError {
    HostingError::Backend("injected failure".to_string())
}

#[async_trait]
impl HostingRepository for FailingRepository {
    async fn get(&self, id: &HostingId) -> HostingResult<Hosting> {
        self.inner.get(id).await
    }

    async fn get_all(&self) -> HostingResult<Vec<Hosting>> {
        if self.faults.listing.load(Ordering::SeqCst) {
            return Err(injected());
        }
        self.inner.get_all().await
    }

    async fn insert(&mut self, hosting: &Hosting) -> HostingResult<()> {
        if self.faults.insert.load(Ordering::SeqCst) {
            return Err(injected());
        }
        self.inner.insert(hosting).await
    }

    async fn update(&mut self, hosting: &Hosting) -> HostingResult<()> {
        if self.faults.update.load(Ordering::SeqCst) {
            return Err(injected());
        }
        self.inner.update(hosting).await
    }

    async fn remove(&mut self, id: &HostingId) -> HostingResult<Hosting> {
        self.inner.remove(id).await
    }
}

/// In-memory store that rejects the keys a JetStream KV bucket rejects
///
/// Valid keys are non-empty, neither start nor end with a dot and only use
/// `[A-Za-z0-9_=/.-]`.
#[derive(Default)]
pub struct StrictKeyStore {
    inner: InMemoryKeyValueStore,
}

impl StrictKeyStore {
    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    fn check(key: &str) -> HostingResult<()> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && !key.ends_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_=/.-".contains(c));
        if valid {
            Ok(())
        } else {
            Err(HostingError::Backend(format!("invalid key: {key:?}")))
        }
    }
}

#[async_trait]
impl KeyValueStore for StrictKeyStore {
    async fn get(&self, key: &str) -> HostingResult<Option<Vec<u8>>> {
        Self::check(key)?;
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> HostingResult<()> {
        Self::check(key)?;
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> HostingResult<()> {
        Self::check(key)?;
        self.inner.delete(key).await
    }

    async fn keys(&self) -> HostingResult<Vec<String>> {
        self.inner.keys().await
    }
}

/// Available counters as a tuple, for compact assertions
pub fn available(status: &hosting_server::ServerStatus) -> (u32, u64, u64) {
    (
        status.available_cores,
        status.available_memory_mb,
        status.available_disk_mb,
    )
}
