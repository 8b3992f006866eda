// Copyright (c) 2025 - Cowboy AI, Inc.
//! Key/Value-backed hosting repository
//!
//! Lays the identity index over any [`KeyValueStore`].
//!
//! # Key Layout
//!
//! ```text
//! hostings.<hex(uuid)>  → JSON hosting record
//! names.<hex(name)>     → owning uuid
//! ```
//!
//! Identifiers and names are hex encoded so that any client supplied string
//! maps to a valid bucket key. Empty identifiers and names have no key at
//! all: lookups of them find nothing without touching the store.
//!
//! # Partial Failures
//!
//! Every uniqueness and validation check runs before the first write. When
//! the backend fails between the writes of one operation, the keys already
//! written are put back the way they were before the backend error is
//! returned.

use async_trait::async_trait;
use tracing::{debug, error};

use super::{name_taken, not_found, uuid_taken, HostingRepository};
use crate::domain::{Hosting, HostingId, ResourceLimits};
use crate::errors::HostingResult;
use crate::store::KeyValueStore;

const HOSTING_PREFIX: &str = "hostings.";
const NAME_PREFIX: &str = "names.";

/// [`HostingRepository`] persisted to a key/value store
pub struct KvHostingRepository<S> {
    limits: ResourceLimits,
    store: S,
}

impl<S: KeyValueStore> KvHostingRepository<S> {
    pub fn new(store: S, limits: ResourceLimits) -> Self {
        Self { limits, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn load(&self, id: &HostingId) -> HostingResult<Option<Hosting>> {
        // an empty id has no valid key and is never stored
        if id.is_empty() {
            return Ok(None);
        }
        match self.store.get(&hosting_key(id)).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, hosting: &Hosting) -> HostingResult<()> {
        let payload = serde_json::to_vec(hosting)?;
        self.store.put(&hosting_key(&hosting.id), payload).await
    }

    async fn name_owner(&self, name: &str) -> HostingResult<Option<HostingId>> {
        if name.is_empty() {
            return Ok(None);
        }
        Ok(self
            .store
            .get(&name_key(name))
            .await?
            .map(|bytes| HostingId::new(String::from_utf8_lossy(&bytes))))
    }

    async fn claim_name(&self, hosting: &Hosting) -> HostingResult<()> {
        self.store
            .put(&name_key(&hosting.name), hosting.id.as_str().as_bytes().to_vec())
            .await
    }
}

#[async_trait]
impl<S: KeyValueStore> HostingRepository for KvHostingRepository<S> {
    async fn get(&self, id: &HostingId) -> HostingResult<Hosting> {
        self.load(id).await?.ok_or_else(|| not_found(id))
    }

    async fn get_all(&self) -> HostingResult<Vec<Hosting>> {
        let keys = self.store.keys().await?;
        let mut hostings = Vec::new();

        for key in keys.iter().filter(|k| k.starts_with(HOSTING_PREFIX)) {
            if let Some(bytes) = self.store.get(key).await? {
                hostings.push(serde_json::from_slice(&bytes)?);
            }
        }

        debug!(count = hostings.len(), "retrieved hostings");
        Ok(hostings)
    }

    async fn insert(&mut self, hosting: &Hosting) -> HostingResult<()> {
        if self.load(&hosting.id).await?.is_some() {
            return Err(uuid_taken(&hosting.id));
        }
        if self.name_owner(&hosting.name).await?.is_some() {
            return Err(name_taken(&hosting.name));
        }

        hosting.validate(&self.limits)?;

        self.save(hosting).await?;
        if let Err(e) = self.claim_name(hosting).await {
            let dropped = self.store.delete(&hosting_key(&hosting.id)).await;
            undo("insert: drop record", dropped);
            return Err(e);
        }

        Ok(())
    }

    async fn update(&mut self, hosting: &Hosting) -> HostingResult<()> {
        let old = self.get(&hosting.id).await?;

        let renamed = old.name != hosting.name;
        if renamed {
            if let Some(owner) = self.name_owner(&hosting.name).await? {
                if owner != hosting.id {
                    return Err(name_taken(&hosting.name));
                }
            }
        }

        hosting.validate(&self.limits)?;

        if renamed {
            self.claim_name(hosting).await?;
        }

        if let Err(e) = self.save(hosting).await {
            if renamed {
                let released = self.store.delete(&name_key(&hosting.name)).await;
                undo("update: release new name", released);
            }
            return Err(e);
        }

        if renamed {
            if let Err(e) = self.store.delete(&name_key(&old.name)).await {
                let restored = self.save(&old).await;
                undo("update: restore record", restored);
                let released = self.store.delete(&name_key(&hosting.name)).await;
                undo("update: release new name", released);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn remove(&mut self, id: &HostingId) -> HostingResult<Hosting> {
        let hosting = self.get(id).await?;

        self.store.delete(&hosting_key(id)).await?;
        if let Err(e) = self.store.delete(&name_key(&hosting.name)).await {
            let restored = self.save(&hosting).await;
            undo("remove: restore record", restored);
            return Err(e);
        }

        Ok(hosting)
    }
}

/// Best effort rollback step; the original error is what gets reported
fn undo(step: &str, result: HostingResult<()>) {
    if let Err(e) = result {
        error!(step, error = %e, "repository rollback failed");
    }
}

fn hosting_key(id: &HostingId) -> String {
    format!("{HOSTING_PREFIX}{}", hex(id.as_str()))
}

fn name_key(name: &str) -> String {
    format!("{NAME_PREFIX}{}", hex(name))
}

fn hex(value: &str) -> String {
    value.bytes().map(|b| format!("{b:02x}")).collect()
}
