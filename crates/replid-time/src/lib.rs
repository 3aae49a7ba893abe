//! REPLID Time - Wall clocks for identifier minting
//!
//! This crate provides:
//! - The `Clock` trait the generator reads unix time through
//! - `SystemClock`: the OS wall clock
//! - `ManualClock`: a frozen, hand-advanced clock for tests and simulation

pub mod clock;

pub use clock::*;
