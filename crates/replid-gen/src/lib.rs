//! REPLID Generator - Coordination-free identifier minting
//!
//! This crate implements the minting pipeline:
//! - Counter: process-local state, randomly seeded, advanced atomically
//! - IdGenerator: packs time, device fingerprint and counter into 40 bits
//! - Branded numeric and string output (hex or decimal)
//! - A lazily created process-wide default generator

pub mod config;
pub mod counter;
pub mod generator;
pub mod global;

pub use config::*;
pub use counter::*;
pub use generator::*;
pub use global::*;
