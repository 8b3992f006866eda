// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting Entity
//!
//! One allocation of compute resources on the server, identified by a
//! generated [`HostingId`] and a unique human-readable name.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::invariants::{validate_identifier, validate_name, validate_resources, ValidationResult};

/// Opaque hosting identifier
///
/// Freshly generated identifiers are UUID v7 strings, but any non-empty
/// string coming back from a client is accepted as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HostingId(String);

impl HostingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new time-ordered identifier
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HostingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Minimum resources every hosting must request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    pub min_cores: u32,
    pub min_memory_mb: u64,
    pub min_disk_mb: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            min_cores: 1,
            min_memory_mb: 1,
            min_disk_mb: 1,
        }
    }
}

/// Hosting Entity
///
/// # Invariants
/// - Identifier is non-empty
/// - Name is non-empty (uniqueness is enforced by the repository)
/// - Cores, memory and disk are at least the configured minimums
///
/// The record is replaced as a whole on update; there are no partial setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hosting {
    #[serde(rename = "uuid")]
    pub id: HostingId,

    pub name: String,

    pub cores: u32,

    #[serde(rename = "memorymb")]
    pub memory_mb: u64,

    #[serde(rename = "diskmb")]
    pub disk_mb: u64,
}

impl Hosting {
    /// Create a hosting with a freshly generated identifier
    pub fn new(name: impl Into<String>, cores: u32, memory_mb: u64, disk_mb: u64) -> Self {
        Self::with_id(HostingId::generate(), name, cores, memory_mb, disk_mb)
    }

    /// Create a hosting with a known identifier (updates, fixtures)
    pub fn with_id(
        id: impl Into<HostingId>,
        name: impl Into<String>,
        cores: u32,
        memory_mb: u64,
        disk_mb: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cores,
            memory_mb,
            disk_mb,
        }
    }

    /// Check the field rules, reporting the first one violated
    ///
    /// Order: identifier, name, cores, memory, disk.
    pub fn validate(&self, limits: &ResourceLimits) -> ValidationResult {
        validate_identifier(self.id.as_str())?;
        validate_name(&self.name)?;
        validate_resources(self.cores, self.memory_mb, self.disk_mb, limits)
    }
}
