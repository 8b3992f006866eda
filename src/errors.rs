// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for hosting operations

use thiserror::Error;

use crate::domain::{CapacityError, ValidationError};

/// Errors that can occur while allocating, updating or removing hostings
#[derive(Debug, Error)]
pub enum HostingError {
    /// A hosting field violates a business rule
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The server does not have enough free resources
    #[error("there aren't resources enough: {0}")]
    Capacity(#[from] CapacityError),

    /// Referenced hosting does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Identifier or name collision
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Persistence or transport failure
    #[error("backend error: {0}")]
    Backend(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for hosting operations
pub type HostingResult<T> = Result<T, HostingError>;

/// Flat classification of [`HostingError`], used by the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Capacity,
    NotFound,
    AlreadyExists,
    Backend,
    Configuration,
}

impl HostingError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HostingError::Validation(_) => ErrorKind::Validation,
            HostingError::Capacity(_) => ErrorKind::Capacity,
            HostingError::NotFound(_) => ErrorKind::NotFound,
            HostingError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            HostingError::Backend(_) => ErrorKind::Backend,
            HostingError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        HostingError::Backend(err.to_string())
    }
}

impl From<async_nats::Error> for HostingError {
    fn from(err: async_nats::Error) -> Self {
        HostingError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for HostingError {
    fn from(err: serde_json::Error) -> Self {
        HostingError::Backend(err.to_string())
    }
}
