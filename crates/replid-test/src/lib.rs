//! REPLID Test Harness - Simulation and integration testing
//!
//! This crate provides:
//! - Multi-device swarm simulation with collision accounting
//! - Cross-crate integration tests (see `tests/`)

pub mod swarm;

pub use swarm::*;
