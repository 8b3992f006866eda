// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting API over NATS request-reply
//!
//! Clients send a JSON request to `{prefix}.api.{operation}` and receive an
//! [`ApiResponse`] on their reply inbox.
//!
//! | Operation | Request body                               | Response fields            |
//! |-----------|--------------------------------------------|----------------------------|
//! | create    | `{name, cores, memorymb, diskmb}`          | `uuid`                     |
//! | list      | empty                                      | `hostings`                 |
//! | update    | `{uuid, name, cores, memorymb, diskmb}`    | `uuid`                     |
//! | remove    | `{uuid}`                                   | `uuid`                     |
//! | health    | empty                                      | `running_time`, `server_status` |
//!
//! Every response carries a `status` code and, on failure, an `error`
//! message.

use serde::{Deserialize, Serialize};

use crate::domain::{Hosting, HostingId, ServerStatus};
use crate::errors::ErrorKind;

pub mod controller;
pub mod server;

pub use controller::HostingController;
pub use server::ApiServer;

/// Response status codes, borrowed from HTTP
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const INTERNAL_ERROR: u16 = 500;
}

/// Status code reported for an error kind
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Validation => status::BAD_REQUEST,
        ErrorKind::NotFound => status::NOT_FOUND,
        ErrorKind::AlreadyExists | ErrorKind::Capacity => status::CONFLICT,
        ErrorKind::Backend | ErrorKind::Configuration => status::INTERNAL_ERROR,
    }
}

/// Body of a remove request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveHostingRequest {
    pub uuid: HostingId,
}

/// Response envelope shared by every operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiResponse {
    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uuid: Option<HostingId>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hostings: Option<Vec<Hosting>>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub running_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub server_status: Option<ServerStatus>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            status: status::OK,
            ..Self::default()
        }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_uuid(mut self, uuid: HostingId) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == status::OK
    }

    /// Failure caused by the server rather than by the request
    pub fn is_server_error(&self) -> bool {
        self.status >= status::INTERNAL_ERROR
    }
}
