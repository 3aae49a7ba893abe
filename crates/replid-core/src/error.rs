//! Error types for REPLID

use thiserror::Error;

/// Core REPLID errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    // Device errors
    #[error("Device id must be a hex string: {0:?}")]
    InvalidDeviceId(String),

    #[error("Device id too short: expected at least 4 hex characters, got {len}")]
    DeviceIdTooShort { len: usize },

    // Decode errors
    #[error("Malformed identifier: {0:?}")]
    MalformedId(String),

    #[error("Identifier out of range: {0} does not fit in 40 bits")]
    IdOutOfRange(u64),
}

/// Result type for REPLID operations
pub type IdResult<T> = Result<T, IdError>;
