// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Hosting Invariants
//!
//! Business rules a hosting must satisfy before the repository accepts it.
//! Every function here is pure: no I/O, no mutation, deterministic.
//!
//! Uniqueness (repository) and free capacity (server ledger) are checked
//! elsewhere; these rules only look at the fields of a single hosting.

use super::ResourceLimits;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Identifier is empty
    #[error("uuid can't be empty")]
    EmptyIdentifier,

    /// Name is empty
    #[error("name can't be empty")]
    EmptyName,

    /// Not enough cores requested
    #[error("number of cores {requested} is below the minimum of {minimum}")]
    CoresBelowMinimum { requested: u32, minimum: u32 },

    /// Not enough memory requested
    #[error("memory size {requested} Mb is below the minimum of {minimum} Mb")]
    MemoryBelowMinimum { requested: u64, minimum: u64 },

    /// Not enough disk requested
    #[error("disk size {requested} Mb is below the minimum of {minimum} Mb")]
    DiskBelowMinimum { requested: u64, minimum: u64 },
}

pub fn validate_identifier(id: &str) -> ValidationResult {
    if id.is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> ValidationResult {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Validate requested resources against the configured minimums
///
/// # Rules
/// - Checked in order cores, memory, disk
/// - The first value below its minimum is reported
pub fn validate_resources(
    cores: u32,
    memory_mb: u64,
    disk_mb: u64,
    limits: &ResourceLimits,
) -> ValidationResult {
    if cores < limits.min_cores {
        return Err(ValidationError::CoresBelowMinimum {
            requested: cores,
            minimum: limits.min_cores,
        });
    }

    if memory_mb < limits.min_memory_mb {
        return Err(ValidationError::MemoryBelowMinimum {
            requested: memory_mb,
            minimum: limits.min_memory_mb,
        });
    }

    if disk_mb < limits.min_disk_mb {
        return Err(ValidationError::DiskBelowMinimum {
            requested: disk_mb,
            minimum: limits.min_disk_mb,
        });
    }

    Ok(())
}
