// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting Server
//!
//! Serves the hosting API over NATS request-reply and persists hostings to a
//! JetStream KV bucket.
//!
//! Run with: cargo run --bin hosting-server
//!
//! Prerequisites:
//! 1. NATS server with JetStream enabled (default: localhost:4222)
//! 2. Server totals set via HOSTING_TOTAL_CORES, HOSTING_TOTAL_MEMORY_MB and
//!    HOSTING_TOTAL_DISK_MB

use anyhow::{Context, Result};
use hosting_server::{
    api::ApiServer,
    store::NatsKeyValueStore,
    subjects::ApiSubjects,
    HostingConfig, KvHostingRepository, NatsClient, Server, ServerService,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("🚀 Starting Hosting Server");

    let config = HostingConfig::from_env().context("Failed to load configuration")?;
    info!("📋 Configuration loaded:");
    info!("  - NATS servers: {:?}", config.nats.servers);
    info!("  - KV bucket: {}", config.bucket.bucket);
    info!("  - Subject prefix: {}", config.subject_prefix);
    info!(
        "  - Capacity: {} cores, {} MB memory, {} MB disk",
        config.capacity.cores, config.capacity.memory_mb, config.capacity.disk_mb
    );

    info!("🔌 Connecting to NATS");
    let client = NatsClient::new(config.nats.clone())
        .await
        .context("Failed to connect to NATS")?;

    let store = NatsKeyValueStore::open(client.jetstream(), config.bucket.clone())
        .await
        .context("Failed to open hosting KV bucket")?;

    let server = Server::new(config.capacity);
    info!("🖥️ Server ledger {}", server.id());

    let repository = KvHostingRepository::new(store, config.limits);
    let service = Arc::new(ServerService::new(server, repository));
    service
        .restore()
        .await
        .context("Failed to restore persisted hostings")?;

    let api = ApiServer::new(
        client,
        ApiSubjects::new(config.subject_prefix.clone()),
        service,
    );
    let listener = api.start().await.context("Failed to start hosting API")?;
    info!("✅ Hosting server ready");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    warn!("🛑 Shutting down");
    listener.abort();
    Ok(())
}
