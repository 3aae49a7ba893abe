//! Device identity for REPLID
//!
//! A device id is provisioned by the hosting system. This crate only checks
//! that it is usable as a fingerprint source: hex characters, at least two
//! bytes long.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{IdError, IdResult};

/// Minimum number of hex characters in a device id (16 bits)
pub const MIN_DEVICE_ID_LEN: usize = 4;

/// Validated device identity - a hex string of at least 4 characters
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Validate a raw device id.
    ///
    /// The hex check runs first, so `"zz"` is `InvalidDeviceId` while `"ab"`
    /// is `DeviceIdTooShort`.
    pub fn parse(raw: &str) -> IdResult<Self> {
        validate_device_id(raw)?;
        Ok(DeviceId(raw.to_owned()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Low 16 bits of the device: its last four hex characters
    #[inline]
    pub fn fingerprint(&self) -> u16 {
        fingerprint_of(&self.0)
    }
}

/// Check a raw device id without allocating
pub fn validate_device_id(raw: &str) -> IdResult<()> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IdError::InvalidDeviceId(raw.to_owned()));
    }
    if raw.len() < MIN_DEVICE_ID_LEN {
        return Err(IdError::DeviceIdTooShort { len: raw.len() });
    }
    Ok(())
}

/// Validate a raw device id and return its 16-bit fingerprint
pub fn device_fingerprint(raw: &str) -> IdResult<u16> {
    validate_device_id(raw)?;
    Ok(fingerprint_of(raw))
}

fn fingerprint_of(valid: &str) -> u16 {
    // All-ASCII after validation, so byte slicing lands on char boundaries.
    let tail = &valid[valid.len() - MIN_DEVICE_ID_LEN..];
    tail.bytes()
        .fold(0u16, |acc, b| (acc << 4) | hex_value(b) as u16)
}

#[inline]
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

impl FromStr for DeviceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceId::parse(s)
    }
}

impl TryFrom<&str> for DeviceId {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        DeviceId::parse(value)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_device_id(&value)?;
        Ok(DeviceId(value))
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device({})", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
