// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosting server configuration
//!
//! Loaded from environment variables:
//!
//! | Variable                  | Required | Default                 |
//! |---------------------------|----------|-------------------------|
//! | `HOSTING_TOTAL_CORES`     | yes      |                         |
//! | `HOSTING_TOTAL_MEMORY_MB` | yes      |                         |
//! | `HOSTING_TOTAL_DISK_MB`   | yes      |                         |
//! | `HOSTING_MIN_CORES`       | no       | `1`                     |
//! | `HOSTING_MIN_MEMORY_MB`   | no       | `1`                     |
//! | `HOSTING_MIN_DISK_MB`     | no       | `1`                     |
//! | `NATS_URL`                | no       | `nats://localhost:4222` |
//! | `HOSTING_KV_BUCKET`       | no       | `hostings`              |
//! | `HOSTING_SUBJECT_PREFIX`  | no       | `hosting`               |

use std::str::FromStr;

use crate::domain::{ResourceLimits, ServerCapacity};
use crate::errors::{HostingError, HostingResult};
use crate::nats::NatsConfig;
use crate::store::KvBucketConfig;
use crate::subjects::DEFAULT_PREFIX;

pub const TOTAL_CORES: &str = "HOSTING_TOTAL_CORES";
pub const TOTAL_MEMORY_MB: &str = "HOSTING_TOTAL_MEMORY_MB";
pub const TOTAL_DISK_MB: &str = "HOSTING_TOTAL_DISK_MB";
pub const MIN_CORES: &str = "HOSTING_MIN_CORES";
pub const MIN_MEMORY_MB: &str = "HOSTING_MIN_MEMORY_MB";
pub const MIN_DISK_MB: &str = "HOSTING_MIN_DISK_MB";
pub const NATS_URL: &str = "NATS_URL";
pub const KV_BUCKET: &str = "HOSTING_KV_BUCKET";
pub const SUBJECT_PREFIX: &str = "HOSTING_SUBJECT_PREFIX";

/// Complete configuration of a hosting server process
#[derive(Debug, Clone)]
pub struct HostingConfig {
    /// Total resources of the server
    pub capacity: ServerCapacity,

    /// Minimum resources per hosting
    pub limits: ResourceLimits,

    /// NATS connection
    pub nats: NatsConfig,

    /// KV bucket hostings are persisted to
    pub bucket: KvBucketConfig,

    /// Root of the API subjects
    pub subject_prefix: String,
}

impl HostingConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> HostingResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> HostingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = ServerCapacity {
            cores: required(&lookup, TOTAL_CORES)?,
            memory_mb: required(&lookup, TOTAL_MEMORY_MB)?,
            disk_mb: required(&lookup, TOTAL_DISK_MB)?,
        };

        let defaults = ResourceLimits::default();
        let limits = ResourceLimits {
            min_cores: optional(&lookup, MIN_CORES, defaults.min_cores)?,
            min_memory_mb: optional(&lookup, MIN_MEMORY_MB, defaults.min_memory_mb)?,
            min_disk_mb: optional(&lookup, MIN_DISK_MB, defaults.min_disk_mb)?,
        };

        let mut nats = NatsConfig {
            name: "hosting-server".to_string(),
            ..NatsConfig::default()
        };
        if let Some(url) = lookup(NATS_URL) {
            nats.servers = url.split(',').map(|s| s.trim().to_string()).collect();
        }

        let mut bucket = KvBucketConfig::default();
        if let Some(name) = lookup(KV_BUCKET) {
            bucket.bucket = name;
        }

        let subject_prefix = lookup(SUBJECT_PREFIX).unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        Ok(Self {
            capacity,
            limits,
            nats,
            bucket,
            subject_prefix,
        })
    }
}

fn required<T, F>(lookup: &F, key: &str) -> HostingResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)
        .ok_or_else(|| HostingError::Configuration(format!("environment variable {key} does not exist")))?;
    parse(key, &value)
}

fn optional<T, F>(lookup: &F, key: &str, default: T) -> HostingResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => parse(key, &value),
        None => Ok(default),
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> HostingResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| HostingError::Configuration(format!("{key} has an invalid value: {value:?}")))
}
