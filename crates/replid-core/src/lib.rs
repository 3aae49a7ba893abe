//! REPLID Core - Fundamental identifier types
//!
//! This crate defines the types shared by every REPLID crate:
//! - Device fingerprints (DeviceId)
//! - The 40-bit identifier layout (PackedId)
//! - Entity-branded identifiers (Id, IntId)
//! - Display helpers and error types

pub mod device;
pub mod layout;
pub mod brand;
pub mod display;
pub mod error;

pub use device::*;
pub use layout::*;
pub use brand::*;
pub use display::*;
pub use error::*;
