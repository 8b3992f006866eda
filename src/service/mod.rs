// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Hosting Management
//!
//! The application service that orchestrates the server resource ledger and
//! the hosting repository.
//!
//! # Architecture
//!
//! ```text
//! Client Request
//!     ↓
//! API Controller (NATS request-reply)
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Server Ledger (capacity) → Hosting Repository (uniqueness, persistence)
//!     ↓
//! Key/Value Store (NATS JetStream KV)
//! ```
//!
//! # Design Principles
//!
//! 1. **Transaction Boundaries**: each service method is one saga under one lock
//! 2. **Explicit Compensation**: a failed second step undoes the first
//! 3. **Injected Collaborators**: ledger and repository are passed in, never global
//! 4. **Async by Default**: persistence is asynchronous
//!
//! # Example
//!
//! ```rust,ignore
//! use hosting_server::service::{CreateHostingCommand, HostingService, ServerService};
//!
//! let service = ServerService::new(server, repository);
//! let id = service
//!     .create_hosting(CreateHostingCommand {
//!         name: "h1".into(),
//!         cores: 1,
//!         memory_mb: 512,
//!         disk_mb: 1024,
//!     })
//!     .await?;
//! ```

pub mod hosting;

pub use hosting::{CreateHostingCommand, HostingService, ServerService};
