// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Accounting and uniqueness properties of the ledger and the hosting
//! sagas, checked with proptest.

mod ledger_invariants;
