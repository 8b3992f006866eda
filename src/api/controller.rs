// Copyright (c) 2025 - Cowboy AI, Inc.
//! Request decoding and dispatch to the hosting service

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::{status, status_for, ApiResponse, RemoveHostingRequest};
use crate::domain::Hosting;
use crate::errors::HostingError;
use crate::service::{CreateHostingCommand, HostingService};
use crate::subjects::Operation;

/// Translates API requests into [`HostingService`] calls
pub struct HostingController<S: ?Sized> {
    service: Arc<S>,
    started_at: DateTime<Utc>,
}

impl<S: HostingService + ?Sized> HostingController<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }

    /// Handle one request and build its response
    pub async fn handle(&self, operation: Operation, payload: &[u8]) -> ApiResponse {
        debug!(%operation, payload_size = payload.len(), "handling request");

        let response = match operation {
            Operation::Create => self.create(payload).await,
            Operation::List => self.list().await,
            Operation::Update => self.update(payload).await,
            Operation::Remove => self.remove(payload).await,
            Operation::Health => self.health().await,
        };

        if let Some(ref message) = response.error {
            if response.is_server_error() {
                error!(%operation, status = response.status, error = %message, "request failed");
            } else {
                warn!(%operation, status = response.status, error = %message, "request rejected");
            }
        }
        response
    }

    async fn create(&self, payload: &[u8]) -> ApiResponse {
        let command: CreateHostingCommand = match decode(payload) {
            Ok(command) => command,
            Err(response) => return response,
        };

        match self.service.create_hosting(command).await {
            Ok(id) => ApiResponse::ok().with_uuid(id),
            Err(e) => failure(e),
        }
    }

    async fn list(&self) -> ApiResponse {
        match self.service.get_hostings().await {
            Ok(hostings) => ApiResponse {
                hostings: Some(hostings),
                ..ApiResponse::ok()
            },
            Err(e) => failure(e),
        }
    }

    async fn update(&self, payload: &[u8]) -> ApiResponse {
        let hosting: Hosting = match decode(payload) {
            Ok(hosting) => hosting,
            Err(response) => return response,
        };
        let id = hosting.id.clone();

        match self.service.update_hosting(hosting).await {
            Ok(()) => ApiResponse::ok().with_uuid(id),
            Err(e) => failure(e),
        }
    }

    async fn remove(&self, payload: &[u8]) -> ApiResponse {
        let request: RemoveHostingRequest = match decode(payload) {
            Ok(request) => request,
            Err(response) => return response,
        };

        match self.service.remove_hosting(&request.uuid).await {
            Ok(removed) => ApiResponse::ok().with_uuid(removed.id),
            Err(e) => failure(e),
        }
    }

    async fn health(&self) -> ApiResponse {
        let running_time = format_running_time(Utc::now() - self.started_at);
        ApiResponse {
            running_time: Some(running_time),
            server_status: Some(self.service.get_server_status().await),
            ..ApiResponse::ok()
        }
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ApiResponse> {
    serde_json::from_slice(payload)
        .map_err(|e| ApiResponse::failure(status::BAD_REQUEST, format!("malformed request: {e}")))
}

fn failure(err: HostingError) -> ApiResponse {
    ApiResponse::failure(status_for(err.kind()), err.to_string())
}

/// Human readable uptime, e.g. `1d 2h 3m 4s`
pub fn format_running_time(elapsed: chrono::Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        total % 86_400 / 3_600,
        total % 3_600 / 60,
        total % 60,
    );

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .into_iter()
        .skip_while(|(value, _)| *value == 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .chain(std::iter::once(format!("{seconds}s")))
        .collect();

    parts.join(" ")
}
