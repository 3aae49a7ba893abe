//! Entity-branded identifiers
//!
//! `Id<T>` and `IntId<T>` carry a zero-sized marker for the entity kind they
//! were minted for. An `Id<Row>` cannot be passed where an `Id<Column>` is
//! expected, yet at runtime it is exactly its `String` (or `u64`).
//!
//! ```compile_fail
//! use replid_core::{cast_to_id, Id};
//!
//! struct Row;
//! struct Column;
//!
//! fn delete_row(_id: Id<Row>) {}
//!
//! let column: Id<Column> = cast_to_id("00ffee0001");
//! delete_row(column);
//! ```
//!
//! Equality, ordering, hashing and serialization only look at the underlying
//! primitive.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{truncate_for_display, IdResult, PackedId};

/// String rendering used for string identifiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdBase {
    /// 10 lowercase hex characters
    #[default]
    Hex,
    /// Base-10 rendering of the 40-bit value
    Decimal,
}

impl IdBase {
    /// Render a packed identifier in this base
    pub fn render(self, packed: PackedId) -> String {
        match self {
            IdBase::Hex => packed.to_hex(),
            IdBase::Decimal => packed.to_decimal(),
        }
    }

    /// Decode a string produced by [`IdBase::render`]
    pub fn decode(self, s: &str) -> IdResult<PackedId> {
        match self {
            IdBase::Hex => PackedId::parse_hex(s),
            IdBase::Decimal => PackedId::parse_decimal(s),
        }
    }
}

// `fn() -> T` keeps the brand Send + Sync and covariant regardless of T.
type Brand<T> = PhantomData<fn() -> T>;

/// String identifier branded for entity kind `T`
pub struct Id<T> {
    raw: String,
    _kind: Brand<T>,
}

impl<T> Id<T> {
    #[inline]
    fn from_raw(raw: String) -> Self {
        Id {
            raw,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.raw
    }

    /// Last six characters, for logs and UI
    #[inline]
    pub fn short(&self) -> &str {
        truncate_for_display(&self.raw)
    }

    /// Decode the bits, assuming the id is in `base`
    pub fn to_packed(&self, base: IdBase) -> IdResult<PackedId> {
        base.decode(&self.raw)
    }

    /// Move the id to another entity kind. No checks are made.
    #[inline]
    pub fn rebrand<U>(self) -> Id<U> {
        Id::from_raw(self.raw)
    }
}

/// Brand an existing string as an identifier of kind `T`.
///
/// Nothing is validated: this is for identifiers whose shape was already
/// checked elsewhere, such as ones read back from storage.
#[inline]
pub fn cast_to_id<T>(raw: impl Into<String>) -> Id<T> {
    Id::from_raw(raw.into())
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id::from_raw(self.raw.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        &self.raw
    }
}

impl<T> From<Id<T>> for String {
    fn from(id: Id<T>) -> Self {
        id.raw
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Id::from_raw)
    }
}

/// Numeric identifier branded for entity kind `T`
pub struct IntId<T> {
    value: u64,
    _kind: Brand<T>,
}

impl<T> IntId<T> {
    #[inline]
    pub fn from_packed(packed: PackedId) -> Self {
        IntId {
            value: packed.to_u64(),
            _kind: PhantomData,
        }
    }

    /// Brand a raw value, rejecting anything wider than 40 bits
    pub fn from_u64(value: u64) -> IdResult<Self> {
        PackedId::from_u64(value).map(Self::from_packed)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.value
    }

    #[inline]
    pub fn packed(self) -> PackedId {
        // Only constructed from a PackedId or a range-checked u64
        PackedId::new((self.value >> 32) as u8, self.value as u32)
    }

    /// The same bits as a branded hex string
    pub fn to_hex_id(self) -> Id<T> {
        Id::from_raw(self.packed().to_hex())
    }

    #[inline]
    pub fn rebrand<U>(self) -> IntId<U> {
        IntId {
            value: self.value,
            _kind: PhantomData,
        }
    }
}

impl<T> Copy for IntId<T> {}

impl<T> Clone for IntId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for IntId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for IntId<T> {}

impl<T> PartialOrd for IntId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for IntId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for IntId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

impl<T> From<IntId<T>> for u64 {
    fn from(id: IntId<T>) -> Self {
        id.value
    }
}

impl<T> fmt::Debug for IntId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntId({:010x})", self.value)
    }
}

impl<T> fmt::Display for IntId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for IntId<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for IntId<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        IntId::from_u64(value).map_err(serde::de::Error::custom)
    }
}
