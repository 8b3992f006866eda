// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server Resource Ledger
//!
//! Tracks total and available cores, memory and disk of the single server
//! hostings are allocated on.
//!
//! # Invariants
//!
//! - `available <= total` for every dimension
//! - `total - available` equals the sum of the resources of every hosting
//!   currently reserved
//!
//! The ledger holds no lock of its own. It is owned by the hosting service,
//! which guards it together with the repository.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::Hosting;

/// A resource dimension tracked by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceDimension {
    Cores,
    Memory,
    Disk,
}

impl fmt::Display for ResourceDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceDimension::Cores => write!(f, "cores"),
            ResourceDimension::Memory => write!(f, "memory mb"),
            ResourceDimension::Disk => write!(f, "disk space mb"),
        }
    }
}

/// A reservation would exceed the available resources
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("there is not {dimension} enough (requested {requested}, available {available})")]
pub struct CapacityError {
    pub dimension: ResourceDimension,
    pub requested: u64,
    pub available: u64,
}

/// Total capacity of the server, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCapacity {
    pub cores: u32,
    pub memory_mb: u64,
    pub disk_mb: u64,
}

/// Point-in-time view of the ledger, used for health reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(rename = "uuid")]
    pub id: Uuid,
    pub total_cores: u32,
    pub total_memory_mb: u64,
    pub total_disk_mb: u64,
    pub available_cores: u32,
    pub available_memory_mb: u64,
    pub available_disk_mb: u64,
}

/// Resource ledger of the server
#[derive(Debug, Clone)]
pub struct Server {
    id: Uuid,
    total: ServerCapacity,
    available_cores: u32,
    available_memory_mb: u64,
    available_disk_mb: u64,
}

impl Server {
    /// Create a ledger with every resource available
    pub fn new(capacity: ServerCapacity) -> Self {
        Self {
            id: Uuid::now_v7(),
            total: capacity,
            available_cores: capacity.cores,
            available_memory_mb: capacity.memory_mb,
            available_disk_mb: capacity.disk_mb,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Reserve the resources of a hosting
    ///
    /// Dimensions are checked cores, memory, disk; the first one short of
    /// resources is reported and nothing is decremented.
    pub fn reserve(&mut self, hosting: &Hosting) -> Result<(), CapacityError> {
        let (cores, memory_mb, disk_mb) = self.remaining_after(hosting)?;

        self.available_cores = cores;
        self.available_memory_mb = memory_mb;
        self.available_disk_mb = disk_mb;
        Ok(())
    }

    /// Give back the resources of a hosting
    ///
    /// Inverse of [`Server::reserve`]. Callers must release each reservation
    /// exactly once.
    pub fn release(&mut self, hosting: &Hosting) {
        self.available_cores = self.available_cores.saturating_add(hosting.cores);
        self.available_memory_mb = self.available_memory_mb.saturating_add(hosting.memory_mb);
        self.available_disk_mb = self.available_disk_mb.saturating_add(hosting.disk_mb);
    }

    /// Swap the reservation of `old` for the one of `new`
    ///
    /// On failure the reservation of `old` is restored and the ledger is left
    /// exactly as it was before the call.
    pub fn replace(&mut self, new: &Hosting, old: &Hosting) -> Result<(), CapacityError> {
        self.release(old);

        if let Err(err) = self.reserve(new) {
            // `old` fit before it was released, so this cannot fail
            if let Err(restore_err) = self.reserve(old) {
                tracing::error!(
                    uuid = %old.id,
                    error = %restore_err,
                    "failed to restore reservation after rejected replace"
                );
            }
            return Err(err);
        }

        Ok(())
    }

    /// Snapshot of total and available resources
    pub fn status(&self) -> ServerStatus {
        ServerStatus {
            id: self.id,
            total_cores: self.total.cores,
            total_memory_mb: self.total.memory_mb,
            total_disk_mb: self.total.disk_mb,
            available_cores: self.available_cores,
            available_memory_mb: self.available_memory_mb,
            available_disk_mb: self.available_disk_mb,
        }
    }

    fn remaining_after(&self, hosting: &Hosting) -> Result<(u32, u64, u64), CapacityError> {
        let cores = self
            .available_cores
            .checked_sub(hosting.cores)
            .ok_or(CapacityError {
                dimension: ResourceDimension::Cores,
                requested: u64::from(hosting.cores),
                available: u64::from(self.available_cores),
            })?;

        let memory_mb = self
            .available_memory_mb
            .checked_sub(hosting.memory_mb)
            .ok_or(CapacityError {
                dimension: ResourceDimension::Memory,
                requested: hosting.memory_mb,
                available: self.available_memory_mb,
            })?;

        let disk_mb = self
            .available_disk_mb
            .checked_sub(hosting.disk_mb)
            .ok_or(CapacityError {
                dimension: ResourceDimension::Disk,
                requested: hosting.disk_mb,
                available: self.available_disk_mb,
            })?;

        Ok((cores, memory_mb, disk_mb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server::new(ServerCapacity {
            cores: 100,
            memory_mb: 100,
            disk_mb: 100,
        })
    }

    fn available(server: &Server) -> (u32, u64, u64) {
        let status = server.status();
        (
            status.available_cores,
            status.available_memory_mb,
            status.available_disk_mb,
        )
    }

    #[test]
    fn test_new_server_is_fully_available() {
        let status = server().status();
        assert_eq!(status.total_cores, 100);
        assert_eq!(status.available_cores, 100);
        assert_eq!(status.available_memory_mb, 100);
        assert_eq!(status.available_disk_mb, 100);
    }

    #[test]
    fn test_reserve_decrements_every_dimension() {
        let mut server = server();
        server.reserve(&Hosting::with_id("uuid1", "h1", 1, 2, 3)).unwrap();
        assert_eq!(available(&server), (99, 98, 97));
    }

    #[test]
    fn test_reserve_whole_server() {
        let mut server = server();
        server.reserve(&Hosting::with_id("uuid1", "h1", 100, 100, 100)).unwrap();
        assert_eq!(available(&server), (0, 0, 0));
    }

    #[test]
    fn test_oversized_reservation_mutates_nothing() {
        let mut server = server();

        for (hosting, dimension) in [
            (Hosting::with_id("u", "h", 101, 1, 1), ResourceDimension::Cores),
            (Hosting::with_id("u", "h", 1, 101, 1), ResourceDimension::Memory),
            (Hosting::with_id("u", "h", 1, 1, 101), ResourceDimension::Disk),
        ] {
            let err = server.reserve(&hosting).unwrap_err();
            assert_eq!(err.dimension, dimension);
            assert_eq!(available(&server), (100, 100, 100));
        }
    }

    #[test]
    fn test_first_failing_dimension_is_reported() {
        let mut server = server();
        let err = server
            .reserve(&Hosting::with_id("u", "h", 1, 500, 500))
            .unwrap_err();

        assert_eq!(err.dimension, ResourceDimension::Memory);
        assert_eq!(err.requested, 500);
        assert_eq!(err.available, 100);
    }

    #[test]
    fn test_release_is_inverse_of_reserve() {
        let mut server = server();
        let hosting = Hosting::with_id("uuid1", "h1", 10, 20, 30);

        server.reserve(&hosting).unwrap();
        server.release(&hosting);

        assert_eq!(available(&server), (100, 100, 100));
    }

    #[test]
    fn test_replace_swaps_reservation() {
        let mut server = server();
        let old = Hosting::with_id("uuid1", "h1", 1, 1, 1);
        let new = Hosting::with_id("uuid1", "h1", 10, 5, 1);

        server.reserve(&old).unwrap();
        server.replace(&new, &old).unwrap();

        assert_eq!(available(&server), (90, 95, 99));
    }

    #[test]
    fn test_replace_can_reuse_resources_of_old() {
        let mut server = server();
        let old = Hosting::with_id("uuid1", "h1", 60, 60, 60);
        let new = Hosting::with_id("uuid1", "h1", 100, 100, 100);

        server.reserve(&old).unwrap();
        server.replace(&new, &old).unwrap();

        assert_eq!(available(&server), (0, 0, 0));
    }

    #[test]
    fn test_failed_replace_restores_old_reservation() {
        let mut server = server();
        let old = Hosting::with_id("uuid1", "h1", 10, 1, 1);
        let new = Hosting::with_id("uuid1", "h1", 101, 1, 1);

        server.reserve(&old).unwrap();
        let err = server.replace(&new, &old).unwrap_err();

        assert_eq!(err.dimension, ResourceDimension::Cores);
        assert_eq!(available(&server), (90, 99, 99));
    }

    #[test]
    fn test_status_serialized_field_names() {
        let json = serde_json::to_value(server().status()).unwrap();
        for field in [
            "uuid",
            "total_cores",
            "total_memory_mb",
            "total_disk_mb",
            "available_cores",
            "available_memory_mb",
            "available_disk_mb",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}
