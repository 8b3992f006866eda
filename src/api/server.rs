// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS request-reply listener for the hosting API

use async_nats::Message;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{status, ApiResponse, HostingController};
use crate::errors::HostingResult;
use crate::nats::NatsClient;
use crate::service::HostingService;
use crate::subjects::ApiSubjects;

/// Serves a [`HostingService`] on the API subjects
pub struct ApiServer<S: ?Sized> {
    client: NatsClient,
    subjects: ApiSubjects,
    controller: Arc<HostingController<S>>,
}

impl<S: HostingService + ?Sized + 'static> ApiServer<S> {
    pub fn new(client: NatsClient, subjects: ApiSubjects, service: Arc<S>) -> Self {
        Self {
            client,
            subjects,
            controller: Arc::new(HostingController::new(service)),
        }
    }

    /// Subscribe to every operation subject and serve requests in the background
    ///
    /// Each request is handled on its own task; the service serializes writes.
    pub async fn start(self) -> HostingResult<JoinHandle<()>> {
        let wildcard = self.subjects.wildcard();
        let mut subscriber = self.client.subscribe(&wildcard).await?;
        info!(subject = %wildcard, "hosting API listening");

        let handle = tokio::spawn(async move {
            while let Some(message) = subscriber.next().await {
                let client = self.client.clone();
                let controller = Arc::clone(&self.controller);
                let subjects = self.subjects.clone();
                tokio::spawn(async move {
                    serve(&client, &subjects, &controller, message).await;
                });
            }
            warn!(subject = %wildcard, "API subscription closed");
        });

        Ok(handle)
    }
}

async fn serve<S: HostingService + ?Sized>(
    client: &NatsClient,
    subjects: &ApiSubjects,
    controller: &HostingController<S>,
    message: Message,
) {
    let subject = message.subject.to_string();
    let Some(reply) = message.reply.as_ref().map(|r| r.to_string()) else {
        warn!(%subject, "dropping request without reply subject");
        return;
    };

    let response = match subjects.operation_of(&subject) {
        Some(operation) => controller.handle(operation, &message.payload).await,
        None => ApiResponse::failure(status::NOT_FOUND, format!("unknown operation: {subject}")),
    };

    let payload = match serde_json::to_vec(&response) {
        Ok(payload) => payload,
        Err(e) => {
            error!(%subject, error = %e, "failed to encode response");
            return;
        }
    };

    if let Err(e) = client.publish_bytes(&reply, payload).await {
        error!(%subject, error = %e, "failed to send reply");
    } else {
        debug!(%subject, status = response.status, "replied");
    }
}
