// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting Service Layer
//!
//! Coordinates the server resource ledger and the hosting repository. Every
//! write is a short saga of a ledger step and a repository step; when the
//! second step fails the first one is compensated.
//!
//! # Sagas
//!
//! ```text
//! create: reserve ──ok──▶ insert ──err──▶ release
//! update: get ──▶ replace(new, old) ──ok──▶ update ──err──▶ replace(old, new)
//! remove: remove ──ok──▶ release
//! ```
//!
//! # Locking
//!
//! Ledger and repository live together behind one `RwLock` owned by the
//! service. Writers hold it exclusively for the whole saga, readers share
//! it, so no caller ever observes a half-applied operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::domain::{Hosting, HostingId, Server, ServerStatus};
use crate::errors::HostingResult;
use crate::repository::HostingRepository;

/// Request to allocate a new hosting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHostingCommand {
    pub name: String,
    pub cores: u32,
    #[serde(rename = "memorymb")]
    pub memory_mb: u64,
    #[serde(rename = "diskmb")]
    pub disk_mb: u64,
}

/// Hosting service trait
///
/// The operations exposed to the transport layer.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Allocate a new hosting and return its identifier
    async fn create_hosting(&self, command: CreateHostingCommand) -> HostingResult<HostingId>;

    /// Every allocated hosting
    async fn get_hostings(&self) -> HostingResult<Vec<Hosting>>;

    /// Free a hosting and return the removed record
    async fn remove_hosting(&self, id: &HostingId) -> HostingResult<Hosting>;

    /// Replace a hosting with new values
    async fn update_hosting(&self, hosting: Hosting) -> HostingResult<()>;

    /// Snapshot of the server ledger
    async fn get_server_status(&self) -> ServerStatus;
}

struct State<R> {
    server: Server,
    repository: R,
}

/// [`HostingService`] backed by a [`Server`] ledger and a [`HostingRepository`]
pub struct ServerService<R> {
    state: RwLock<State<R>>,
}

impl<R: HostingRepository> ServerService<R> {
    /// Create the service, taking ownership of ledger and repository
    pub fn new(server: Server, repository: R) -> Self {
        Self {
            state: RwLock::new(State { server, repository }),
        }
    }

    /// Re-reserve the resources of hostings already persisted
    ///
    /// Used at startup when the repository outlives the process, so the
    /// ledger starts from the allocations it already holds.
    pub async fn restore(&self) -> HostingResult<usize> {
        let mut state = self.state.write().await;
        let State { server, repository } = &mut *state;

        let hostings = repository.get_all().await?;
        for hosting in &hostings {
            server.reserve(hosting)?;
        }

        info!(count = hostings.len(), "restored hostings into server ledger");
        Ok(hostings.len())
    }
}

#[async_trait]
impl<R: HostingRepository> HostingService for ServerService<R> {
    async fn create_hosting(&self, command: CreateHostingCommand) -> HostingResult<HostingId> {
        let hosting = Hosting::new(
            command.name,
            command.cores,
            command.memory_mb,
            command.disk_mb,
        );

        let mut state = self.state.write().await;
        let State { server, repository } = &mut *state;

        server.reserve(&hosting)?;

        if let Err(e) = repository.insert(&hosting).await {
            server.release(&hosting);
            warn!(uuid = %hosting.id, error = %e, "hosting rejected, reservation released");
            return Err(e);
        }

        info!(uuid = %hosting.id, name = %hosting.name, "created hosting");
        Ok(hosting.id)
    }

    async fn get_hostings(&self) -> HostingResult<Vec<Hosting>> {
        let state = self.state.read().await;
        state.repository.get_all().await
    }

    async fn remove_hosting(&self, id: &HostingId) -> HostingResult<Hosting> {
        let mut state = self.state.write().await;
        let State { server, repository } = &mut *state;

        let hosting = repository.remove(id).await?;
        server.release(&hosting);

        info!(uuid = %hosting.id, "removed hosting");
        Ok(hosting)
    }

    async fn update_hosting(&self, hosting: Hosting) -> HostingResult<()> {
        let mut state = self.state.write().await;
        let State { server, repository } = &mut *state;

        let old = repository.get(&hosting.id).await?;
        server.replace(&hosting, &old)?;

        if let Err(e) = repository.update(&hosting).await {
            if let Err(revert_err) = server.replace(&old, &hosting) {
                error!(
                    uuid = %hosting.id,
                    error = %revert_err,
                    "failed to revert server ledger after rejected update"
                );
            } else {
                warn!(uuid = %hosting.id, error = %e, "hosting update rejected, ledger reverted");
            }
            return Err(e);
        }

        info!(uuid = %hosting.id, "updated hosting");
        Ok(())
    }

    async fn get_server_status(&self) -> ServerStatus {
        self.state.read().await.server.status()
    }
}
