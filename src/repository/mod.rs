// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting Repository - Identity Index
//!
//! Maps identifiers to hostings and enforces the two uniqueness constraints
//! of the domain: no two hostings share an identifier, no two hostings share
//! a name.
//!
//! # Write Semantics
//!
//! ```text
//! insert: uuid taken? → name taken? → validate → write both mappings
//! update: uuid known? → new name taken by another? → validate → rewrite + re-key name
//! remove: uuid known? → delete both mappings
//! ```
//!
//! A rejected write is a complete no-op. Repositories hold no lock: the
//! hosting service owns the repository and serializes writers itself, which
//! is why writes take `&mut self`.

use async_trait::async_trait;

use crate::domain::{Hosting, HostingId};
use crate::errors::{HostingError, HostingResult};

pub mod kv;
pub mod memory;

pub use kv::KvHostingRepository;
pub use memory::InMemoryHostingRepository;

/// Identity index over persisted hostings
#[async_trait]
pub trait HostingRepository: Send + Sync {
    /// Look up a hosting by identifier
    ///
    /// # Errors
    /// - `NotFound` if no hosting has this identifier
    async fn get(&self, id: &HostingId) -> HostingResult<Hosting>;

    /// Every hosting, in no particular order
    async fn get_all(&self) -> HostingResult<Vec<Hosting>>;

    /// Add a new hosting
    ///
    /// # Errors
    /// - `AlreadyExists("uuid: …")` if the identifier is taken
    /// - `AlreadyExists("name: …")` if the name is taken
    /// - `Validation` if a field rule is violated
    async fn insert(&mut self, hosting: &Hosting) -> HostingResult<()>;

    /// Replace an existing hosting, possibly renaming it
    ///
    /// # Errors
    /// - `NotFound` if the identifier is unknown
    /// - `AlreadyExists("name: …")` if the new name belongs to another hosting
    /// - `Validation` if a field rule is violated
    async fn update(&mut self, hosting: &Hosting) -> HostingResult<()>;

    /// Delete a hosting and return the removed record
    ///
    /// # Errors
    /// - `NotFound` if the identifier is unknown
    async fn remove(&mut self, id: &HostingId) -> HostingResult<Hosting>;
}

pub(crate) fn not_found(id: &HostingId) -> HostingError {
    HostingError::NotFound(format!("uuid: {id}"))
}

pub(crate) fn uuid_taken(id: &HostingId) -> HostingError {
    HostingError::AlreadyExists(format!("uuid: {id}"))
}

pub(crate) fn name_taken(name: &str) -> HostingError {
    HostingError::AlreadyExists(format!("name: {name}"))
}
