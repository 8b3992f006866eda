// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory hosting repository

use async_trait::async_trait;
use std::collections::HashMap;

use super::{name_taken, not_found, uuid_taken, HostingRepository};
use crate::domain::{Hosting, HostingId, ResourceLimits};
use crate::errors::HostingResult;

/// [`HostingRepository`] kept entirely in process memory
///
/// Two maps, always mutated together:
/// - identifier → hosting
/// - name → identifier
#[derive(Debug, Clone)]
pub struct InMemoryHostingRepository {
    limits: ResourceLimits,
    hostings: HashMap<HostingId, Hosting>,
    names: HashMap<String, HostingId>,
}

impl InMemoryHostingRepository {
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            limits,
            hostings: HashMap::new(),
            names: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.hostings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hostings.is_empty()
    }
}

#[async_trait]
impl HostingRepository for InMemoryHostingRepository {
    async fn get(&self, id: &HostingId) -> HostingResult<Hosting> {
        self.hostings.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_all(&self) -> HostingResult<Vec<Hosting>> {
        Ok(self.hostings.values().cloned().collect())
    }

    async fn insert(&mut self, hosting: &Hosting) -> HostingResult<()> {
        if self.hostings.contains_key(&hosting.id) {
            return Err(uuid_taken(&hosting.id));
        }
        if self.names.contains_key(&hosting.name) {
            return Err(name_taken(&hosting.name));
        }

        hosting.validate(&self.limits)?;

        self.names.insert(hosting.name.clone(), hosting.id.clone());
        self.hostings.insert(hosting.id.clone(), hosting.clone());
        Ok(())
    }

    async fn update(&mut self, hosting: &Hosting) -> HostingResult<()> {
        let old_name = match self.hostings.get(&hosting.id) {
            Some(old) => old.name.clone(),
            None => return Err(not_found(&hosting.id)),
        };

        let renamed = old_name != hosting.name;
        if renamed {
            if let Some(owner) = self.names.get(&hosting.name) {
                if *owner != hosting.id {
                    return Err(name_taken(&hosting.name));
                }
            }
        }

        hosting.validate(&self.limits)?;

        if renamed {
            self.names.remove(&old_name);
            self.names.insert(hosting.name.clone(), hosting.id.clone());
        }
        self.hostings.insert(hosting.id.clone(), hosting.clone());
        Ok(())
    }

    async fn remove(&mut self, id: &HostingId) -> HostingResult<Hosting> {
        let hosting = self.hostings.remove(id).ok_or_else(|| not_found(id))?;
        self.names.remove(&hosting.name);
        Ok(hosting)
    }
}
