// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting capacity server
//!
//! Tracks the finite cores, memory and disk of one server and hands them out
//! to named hostings.
//!
//! - [`domain`]: hostings, field rules and the server resource ledger
//! - [`repository`]: identity index enforcing unique identifiers and names
//! - [`service`]: sagas keeping ledger and repository consistent
//! - [`store`]: key/value persistence, in memory or NATS JetStream KV
//! - [`api`]: NATS request-reply transport
//!
//! # Example
//!
//! ```rust
//! use hosting_server::domain::{ResourceLimits, Server, ServerCapacity};
//! use hosting_server::repository::InMemoryHostingRepository;
//! use hosting_server::service::{CreateHostingCommand, HostingService, ServerService};
//!
//! # tokio_test::block_on(async {
//! let server = Server::new(ServerCapacity { cores: 8, memory_mb: 4096, disk_mb: 10240 });
//! let service = ServerService::new(
//!     server,
//!     InMemoryHostingRepository::new(ResourceLimits::default()),
//! );
//!
//! service
//!     .create_hosting(CreateHostingCommand {
//!         name: "blog".to_string(),
//!         cores: 2,
//!         memory_mb: 512,
//!         disk_mb: 1024,
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(service.get_server_status().await.available_cores, 6);
//! # });
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod nats;
pub mod repository;
pub mod service;
pub mod store;
pub mod subjects;

// Re-export commonly used types
pub use config::HostingConfig;
pub use domain::{Hosting, HostingId, ResourceLimits, Server, ServerCapacity, ServerStatus};
pub use errors::{ErrorKind, HostingError, HostingResult};
pub use nats::{NatsClient, NatsConfig};
pub use repository::{HostingRepository, InMemoryHostingRepository, KvHostingRepository};
pub use service::{CreateHostingCommand, HostingService, ServerService};
