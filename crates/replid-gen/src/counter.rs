//! Minting counter

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Shared 32-bit counter behind every minted identifier.
///
/// Seeded once, then advanced by exactly one per identifier, wrapping at
/// 2^32. Only the low 16 bits end up in an identifier.
pub struct Counter {
    value: AtomicU32,
}

impl Counter {
    /// Counter seeded uniformly from the whole 32-bit space
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u32>())
    }

    /// Counter with a fixed seed; the first `next()` returns `seed + 1`
    pub fn with_seed(seed: u32) -> Self {
        Counter {
            value: AtomicU32::new(seed),
        }
    }

    /// Advance and return the new value
    #[inline]
    pub fn next(&self) -> u32 {
        // A single RMW: concurrent callers never observe the same value
        self.value.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Last value handed out (or the seed if none yet)
    #[inline]
    pub fn peek(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter({:08x})", self.peek())
    }
}
