//! Identifier bit layout
//!
//! Every identifier is 40 bits, stored in a `u64`:
//!
//! ```text
//! [time:8][device:16][counter:16]
//!  \____/ \_______________________/
//!  high8          low32
//! ```
//!
//! The canonical string form is exactly 10 lowercase hex characters; the
//! secondary form is the decimal rendering of the same value.

use std::fmt;

use crate::{IdError, IdResult};

/// Number of significant bits in an identifier
pub const ID_BITS: u32 = 40;

/// Largest value an identifier can hold
pub const ID_MAX: u64 = (1 << ID_BITS) - 1;

/// Length of the canonical hex form
pub const HEX_ID_LEN: usize = 10;

/// Minimum width the seconds are rendered at before taking the time digits
const TIME_HEX_MIN_DIGITS: u32 = 5;

/// Decoded 40-bit identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PackedId {
    time: u8,
    low: u32,
}

impl PackedId {
    pub const ZERO: PackedId = PackedId { time: 0, low: 0 };

    #[inline]
    pub fn new(time: u8, low: u32) -> Self {
        PackedId { time, low }
    }

    /// Pack from the three fields
    /// Format: \[time:8\]\[device:16\]\[counter:16\]
    #[inline]
    pub fn from_fields(time: u8, device: u16, counter: u16) -> Self {
        PackedId {
            time,
            low: ((device as u32) << 16) | counter as u32,
        }
    }

    /// Time-derived high byte
    #[inline]
    pub fn time_field(self) -> u8 {
        self.time
    }

    #[inline]
    pub fn low32(self) -> u32 {
        self.low
    }

    /// Fingerprint of the minting device
    #[inline]
    pub fn device_field(self) -> u16 {
        (self.low >> 16) as u16
    }

    #[inline]
    pub fn counter_field(self) -> u16 {
        self.low as u16
    }

    #[inline]
    pub fn to_u64(self) -> u64 {
        ((self.time as u64) << 32) | self.low as u64
    }

    pub fn from_u64(value: u64) -> IdResult<Self> {
        if value > ID_MAX {
            return Err(IdError::IdOutOfRange(value));
        }
        Ok(PackedId {
            time: (value >> 32) as u8,
            low: value as u32,
        })
    }

    /// Canonical form: 10 lowercase hex characters
    pub fn to_hex(self) -> String {
        format!("{:02x}{:08x}", self.time, self.low)
    }

    /// Decimal rendering of the 40-bit value
    pub fn to_decimal(self) -> String {
        self.to_u64().to_string()
    }

    /// Decode the canonical hex form. Upper-case digits are accepted.
    pub fn parse_hex(s: &str) -> IdResult<Self> {
        if s.len() != HEX_ID_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(IdError::MalformedId(s.to_owned()));
        }
        let value =
            u64::from_str_radix(s, 16).map_err(|_| IdError::MalformedId(s.to_owned()))?;
        Self::from_u64(value)
    }

    /// Decode the decimal form
    pub fn parse_decimal(s: &str) -> IdResult<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::MalformedId(s.to_owned()));
        }
        let value = s
            .parse::<u64>()
            .map_err(|_| IdError::MalformedId(s.to_owned()))?;
        Self::from_u64(value)
    }
}

/// Derive the time byte from whole unix seconds.
///
/// The seconds are rendered as hex and the digits at character positions 3
/// and 4 are kept. Renderings shorter than five digits are left-padded with
/// zeros first, so the result is always defined.
pub fn time_field_from_secs(secs: u64) -> u8 {
    let digits = hex_digit_count(secs).max(TIME_HEX_MIN_DIGITS);
    let shift = 4 * (digits - TIME_HEX_MIN_DIGITS);
    (secs >> shift) as u8
}

#[inline]
fn hex_digit_count(value: u64) -> u32 {
    if value == 0 {
        1
    } else {
        (64 - value.leading_zeros() + 3) / 4
    }
}

impl From<PackedId> for u64 {
    fn from(id: PackedId) -> Self {
        id.to_u64()
    }
}

impl TryFrom<u64> for PackedId {
    type Error = IdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        PackedId::from_u64(value)
    }
}

impl fmt::Debug for PackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packed({:02x}:{:04x}:{:04x})",
            self.time,
            self.device_field(),
            self.counter_field()
        )
    }
}

impl fmt::Display for PackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:08x}", self.time, self.low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fields_pack() {
        let id = PackedId::from_fields(0xab, 0xffee, 0x0012);
        assert_eq!(id.time_field(), 0xab);
        assert_eq!(id.device_field(), 0xffee);
        assert_eq!(id.counter_field(), 0x0012);
        assert_eq!(id.low32(), 0xffee_0012);
        assert_eq!(id.to_u64(), 0xab_ffee_0012);
    }

    #[test]
    fn test_hex_is_zero_padded() {
        let id = PackedId::from_fields(0x01, 0x0002, 0x0003);
        assert_eq!(id.to_hex(), "0100020003");
        assert_eq!(id.to_string(), "0100020003");
        assert_eq!(PackedId::ZERO.to_hex(), "0000000000");
    }

    #[test]
    fn test_decimal_matches_value() {
        let id = PackedId::from_fields(0xff, 0xffff, 0xffff);
        assert_eq!(id.to_u64(), ID_MAX);
        assert_eq!(id.to_decimal(), "1099511627775");
        assert_eq!(PackedId::parse_decimal("1099511627775").unwrap(), id);
    }

    #[test]
    fn test_from_u64_out_of_range() {
        assert_eq!(
            PackedId::from_u64(ID_MAX + 1),
            Err(IdError::IdOutOfRange(ID_MAX + 1))
        );
        assert!(PackedId::parse_decimal("1099511627776").is_err());
    }

    #[test]
    fn test_parse_hex_rejects_bad_input() {
        assert!(PackedId::parse_hex("").is_err());
        assert!(PackedId::parse_hex("abc").is_err());
        assert!(PackedId::parse_hex("00000000000").is_err());
        assert!(PackedId::parse_hex("+123456789").is_err());
        assert!(PackedId::parse_hex("xx00000000").is_err());
    }

    #[test]
    fn test_parse_hex_uppercase() {
        let id = PackedId::parse_hex("ABFFEE0012").unwrap();
        assert_eq!(id.to_hex(), "abffee0012");
    }

    #[test]
    fn test_parse_decimal_rejects_signs() {
        assert!(PackedId::parse_decimal("+12").is_err());
        assert!(PackedId::parse_decimal("-12").is_err());
        assert!(PackedId::parse_decimal("").is_err());
    }

    #[test]
    fn test_time_field_current_era() {
        // 0x6543_21ab -> hex "654321ab", positions 3..5 = "32"
        assert_eq!(time_field_from_secs(0x6543_21ab), 0x32);
        // 1_700_000_000 = 0x6553_f100 -> "6553f100" -> "3f"
        assert_eq!(time_field_from_secs(1_700_000_000), 0x3f);
    }

    #[test]
    fn test_time_field_digit_widths() {
        // Five digits: positions 3..5 are the last two digits
        assert_eq!(time_field_from_secs(0x1_23_45), 0x45);
        // Nine digits
        assert_eq!(time_field_from_secs(0x1_2345_6789), 0x45);
        // Fewer than five digits are left-padded
        assert_eq!(time_field_from_secs(0xabc), 0xbc);
        assert_eq!(time_field_from_secs(0), 0);
    }

    #[test]
    fn test_time_field_matches_string_slice() {
        for secs in [0x10000u64, 0x6553_f100, 0x7fff_ffff, 0xffff_ffff, 0x1_0000_0000] {
            let hex = format!("{:x}", secs);
            let expected = u8::from_str_radix(&hex[3..5], 16).unwrap();
            assert_eq!(time_field_from_secs(secs), expected, "secs={:x}", secs);
        }
    }

    proptest! {
        #[test]
        fn prop_hex_reproduces_fields(
            time in any::<u8>(),
            device in any::<u16>(),
            counter in any::<u16>(),
        ) {
            let id = PackedId::from_fields(time, device, counter);
            let hex = id.to_hex();
            prop_assert_eq!(hex.len(), HEX_ID_LEN);
            prop_assert!(hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));

            let decoded = PackedId::parse_hex(&hex).unwrap();
            prop_assert_eq!(PackedId::new(decoded.time_field(), decoded.low32()).to_hex(), hex);
        }

        #[test]
        fn prop_time_field_matches_hex_digits(secs in 0x10000u64..u64::MAX) {
            let hex = format!("{:x}", secs);
            let expected = u8::from_str_radix(&hex[3..5], 16).unwrap();
            prop_assert_eq!(time_field_from_secs(secs), expected);
        }
    }
}
