// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting Domain Models
//!
//! Core domain concepts for allocating server capacity to hostings.
//!
//! # Entities
//!
//! - [`Hosting`] - One allocation of cores, memory and disk under a unique name
//! - [`Server`] - The resource ledger of the server hostings live on
//!
//! # Invariants
//!
//! - [`invariants`] - Pure field validation for hostings
//! - [`CapacityError`] - Raised by the ledger when resources run short

pub mod hosting;
pub mod invariants;
pub mod server;

pub use hosting::{Hosting, HostingId, ResourceLimits};
pub use invariants::{ValidationError, ValidationResult};
pub use server::{CapacityError, ResourceDimension, Server, ServerCapacity, ServerStatus};
