// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Resource Ledger and Hosting Sagas
//!
//! Random operation sequences are replayed against a fresh service and the
//! accounting identity is checked after every step:
//!
//! ```text
//! available_X + Σ allocated_X == total_X   for X in {cores, memory, disk}
//! ```

use hosting_server::domain::{Hosting, ResourceLimits, Server, ServerCapacity};
use hosting_server::repository::InMemoryHostingRepository;
use hosting_server::service::{CreateHostingCommand, HostingService, ServerService};
use hosting_server::ServerStatus;
use proptest::prelude::*;
use std::collections::HashSet;

const TOTAL: ServerCapacity = ServerCapacity {
    cores: 64,
    memory_mb: 256,
    disk_mb: 512,
};

// ============================================================================
// Operation Model
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Create {
        name: u8,
        cores: u32,
        memory_mb: u64,
        disk_mb: u64,
    },
    Update {
        slot: usize,
        name: u8,
        cores: u32,
        memory_mb: u64,
        disk_mb: u64,
    },
    Remove {
        slot: usize,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..12, 0u32..24, 0u64..96, 0u64..192).prop_map(
            |(name, cores, memory_mb, disk_mb)| Op::Create { name, cores, memory_mb, disk_mb }
        ),
        2 => (0usize..16, 0u8..12, 0u32..24, 0u64..96, 0u64..192).prop_map(
            |(slot, name, cores, memory_mb, disk_mb)| Op::Update {
                slot,
                name,
                cores,
                memory_mb,
                disk_mb,
            }
        ),
        1 => (0usize..16).prop_map(|slot| Op::Remove { slot }),
    ]
}

// ============================================================================
// Checks
// ============================================================================

fn check_accounting(status: &ServerStatus, hostings: &[Hosting]) -> Result<(), TestCaseError> {
    let cores: u32 = hostings.iter().map(|h| h.cores).sum();
    let memory: u64 = hostings.iter().map(|h| h.memory_mb).sum();
    let disk: u64 = hostings.iter().map(|h| h.disk_mb).sum();

    prop_assert_eq!(status.available_cores + cores, status.total_cores);
    prop_assert_eq!(status.available_memory_mb + memory, status.total_memory_mb);
    prop_assert_eq!(status.available_disk_mb + disk, status.total_disk_mb);
    Ok(())
}

fn check_uniqueness(hostings: &[Hosting]) -> Result<(), TestCaseError> {
    let ids: HashSet<_> = hostings.iter().map(|h| h.id.clone()).collect();
    let names: HashSet<_> = hostings.iter().map(|h| h.name.clone()).collect();

    prop_assert_eq!(ids.len(), hostings.len());
    prop_assert_eq!(names.len(), hostings.len());
    Ok(())
}

fn sorted(mut hostings: Vec<Hosting>) -> Vec<Hosting> {
    hostings.sort_by(|a, b| a.id.cmp(&b.id));
    hostings
}

async fn replay(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let service = ServerService::new(
        Server::new(TOTAL),
        InMemoryHostingRepository::new(ResourceLimits::default()),
    );

    for op in ops {
        let before_status = service.get_server_status().await;
        let before = sorted(service.get_hostings().await.unwrap());

        let result = match op {
            Op::Create {
                name,
                cores,
                memory_mb,
                disk_mb,
            } => service
                .create_hosting(CreateHostingCommand {
                    name: format!("h{name}"),
                    cores,
                    memory_mb,
                    disk_mb,
                })
                .await
                .map(|_| ()),
            Op::Update {
                slot,
                name,
                cores,
                memory_mb,
                disk_mb,
            } => match before.get(slot % before.len().max(1)) {
                Some(target) => {
                    let hosting = Hosting::with_id(
                        target.id.clone(),
                        format!("h{name}"),
                        cores,
                        memory_mb,
                        disk_mb,
                    );
                    service.update_hosting(hosting).await
                }
                None => continue,
            },
            Op::Remove { slot } => match before.get(slot % before.len().max(1)) {
                Some(target) => service.remove_hosting(&target.id).await.map(|_| ()),
                None => continue,
            },
        };

        let status = service.get_server_status().await;
        let hostings = sorted(service.get_hostings().await.unwrap());

        if result.is_err() {
            prop_assert_eq!(&status, &before_status);
            prop_assert_eq!(&hostings, &before);
        }

        check_accounting(&status, &hostings)?;
        check_uniqueness(&hostings)?;
    }

    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: every observable state satisfies the accounting identity,
    /// rejected operations change nothing, and names and ids stay unique
    #[test]
    fn prop_sagas_preserve_ledger_and_index(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        runtime.block_on(replay(ops))?;
    }

    /// Property: releasing everything that was reserved restores the totals
    #[test]
    fn prop_release_undoes_reserve(
        sizes in prop::collection::vec((1u32..16, 1u64..64, 1u64..128), 0..20)
    ) {
        let mut server = Server::new(TOTAL);
        let mut reserved = Vec::new();

        for (i, (cores, memory_mb, disk_mb)) in sizes.into_iter().enumerate() {
            let hosting = Hosting::with_id(format!("id{i}"), format!("h{i}"), cores, memory_mb, disk_mb);
            if server.reserve(&hosting).is_ok() {
                reserved.push(hosting);
            }
        }

        for hosting in &reserved {
            server.release(hosting);
        }

        let status = server.status();
        prop_assert_eq!(status.available_cores, TOTAL.cores);
        prop_assert_eq!(status.available_memory_mb, TOTAL.memory_mb);
        prop_assert_eq!(status.available_disk_mb, TOTAL.disk_mb);
    }

    /// Property: a failed reservation leaves the ledger untouched
    #[test]
    fn prop_failed_reserve_is_atomic(
        cores in 0u32..200,
        memory_mb in 0u64..600,
        disk_mb in 0u64..1200,
    ) {
        let mut server = Server::new(TOTAL);
        let before = server.status();

        let hosting = Hosting::with_id("id", "h", cores, memory_mb, disk_mb);
        if server.reserve(&hosting).is_err() {
            prop_assert_eq!(server.status(), before);
        } else {
            prop_assert_eq!(server.status().available_cores, TOTAL.cores - cores);
        }
    }
}
