// Copyright (c) 2025 - Cowboy AI, Inc.

//! NATS subject hierarchy for the hosting API
//!
//! Every API operation is served on its own request-reply subject:
//!
//! ```text
//! {prefix}.api.{operation}
//! ```
//!
//! # Examples
//!
//! ```rust
//! use hosting_server::subjects::{ApiSubjects, Operation};
//!
//! let subjects = ApiSubjects::new("hosting");
//! assert_eq!(subjects.subject(Operation::Create), "hosting.api.create");
//! assert_eq!(subjects.wildcard(), "hosting.api.>");
//! assert_eq!(subjects.operation_of("hosting.api.remove"), Some(Operation::Remove));
//! ```

use std::fmt;

/// Default root namespace for hosting subjects
pub const DEFAULT_PREFIX: &str = "hosting";

const API_SEGMENT: &str = "api";

/// Operations exposed by the hosting API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Allocate a new hosting
    Create,
    /// List every hosting
    List,
    /// Replace an existing hosting
    Update,
    /// Free a hosting
    Remove,
    /// Server ledger status and uptime
    Health,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::List,
        Operation::Update,
        Operation::Remove,
        Operation::Health,
    ];

    fn from_segment(segment: &str) -> Option<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.to_string() == segment)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::List => write!(f, "list"),
            Operation::Update => write!(f, "update"),
            Operation::Remove => write!(f, "remove"),
            Operation::Health => write!(f, "health"),
        }
    }
}

/// Subjects of one hosting API instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSubjects {
    prefix: String,
}

impl ApiSubjects {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Subject an operation is served on
    pub fn subject(&self, operation: Operation) -> String {
        format!("{}.{}.{}", self.prefix, API_SEGMENT, operation)
    }

    /// Subscription covering every operation
    pub fn wildcard(&self) -> String {
        format!("{}.{}.>", self.prefix, API_SEGMENT)
    }

    /// Operation addressed by a concrete subject, if any
    pub fn operation_of(&self, subject: &str) -> Option<Operation> {
        let rest = subject
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('.')?
            .strip_prefix(API_SEGMENT)?
            .strip_prefix('.')?;
        Operation::from_segment(rest)
    }
}

impl Default for ApiSubjects {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
