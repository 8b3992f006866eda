// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS client abstraction for the hosting API and persistence

use async_nats::{jetstream, Client, ConnectOptions, Subscriber};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{HostingError, HostingResult};

/// Configuration for NATS connection
#[derive(Debug, Clone)]
pub struct NatsConfig {
    /// NATS server URLs
    pub servers: Vec<String>,
    /// Client name
    pub name: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            servers: vec!["nats://localhost:4222".to_string()],
            name: "hosting-client".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// NATS client wrapper
#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Create a new NATS client with the given configuration
    pub async fn new(config: NatsConfig) -> HostingResult<Self> {
        let connect_options = ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.connect_timeout)
            .request_timeout(Some(config.request_timeout));

        let client = async_nats::connect_with_options(config.servers.join(","), connect_options)
            .await
            .map_err(HostingError::backend)?;

        info!("Connected to NATS at {:?}", config.servers);

        Ok(Self { client })
    }

    /// Publish raw bytes to a subject
    pub async fn publish_bytes(&self, subject: &str, payload: Vec<u8>) -> HostingResult<()> {
        self.client
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(HostingError::backend)?;

        debug!("Published message to subject: {}", subject);
        Ok(())
    }

    /// Subscribe to a subject
    pub async fn subscribe(&self, subject: &str) -> HostingResult<Subscriber> {
        let subscriber = self
            .client
            .subscribe(subject.to_string())
            .await
            .map_err(HostingError::backend)?;

        info!("Subscribed to subject: {}", subject);
        Ok(subscriber)
    }

    /// Request-reply pattern
    pub async fn request<T, R>(&self, subject: &str, request: &T) -> HostingResult<R>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let payload = serde_json::to_vec(request)?;

        let response = self
            .client
            .request(subject.to_string(), payload.into())
            .await
            .map_err(HostingError::backend)?;

        let result: R = serde_json::from_slice(&response.payload)?;
        Ok(result)
    }

    /// JetStream context on this connection
    pub fn jetstream(&self) -> jetstream::Context {
        jetstream::new(self.client.clone())
    }
}
